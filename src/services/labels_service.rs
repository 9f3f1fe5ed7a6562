use crate::{
    db::models::label::{Label, NewLabel},
    db::repositories::{LabelStore, StoreError},
    error::{AppError, AppResult},
    routes::labels::{CreateLabelRequest, EditLabelRequest},
    services::context::RepoContext,
};

pub struct LabelsService;

impl LabelsService {
    /// Labels of the context's repository, in store order.
    pub async fn list(store: &dyn LabelStore, ctx: &RepoContext) -> AppResult<Vec<Label>> {
        store
            .find_all_by_repository(ctx.repository_id)
            .await
            .map_err(AppError::store("list_labels"))
    }

    /// Looks a label up by id alone, without repository scoping.
    pub async fn get(store: &dyn LabelStore, label_id: i64) -> AppResult<Label> {
        Self::lookup(store, label_id).await
    }

    pub async fn create(
        store: &dyn LabelStore,
        ctx: &RepoContext,
        req: &CreateLabelRequest,
    ) -> AppResult<Label> {
        let grant = ctx.writer()?;

        let new_label = NewLabel::new(&grant, &req.name, &req.color);
        let label_id = store
            .insert(new_label)
            .await
            .map_err(AppError::store("insert_label"))?;

        // Re-read so the response reflects what the store actually persisted.
        let label = store
            .find_by_id(label_id)
            .await
            .map_err(AppError::store("reload_label"))?;

        tracing::info!(
            label_id = label.id,
            repository_id = label.repository_id,
            user_id = grant.user_id(),
            "Label created"
        );
        Ok(label)
    }

    pub async fn edit(
        store: &dyn LabelStore,
        ctx: &RepoContext,
        label_id: i64,
        changes: &EditLabelRequest,
    ) -> AppResult<Label> {
        let grant = ctx.writer()?;

        let mut label = Self::lookup(store, label_id).await?;
        if label.repository_id != grant.repository_id() {
            tracing::warn!(
                label_id,
                label_repository_id = label.repository_id,
                repository_id = grant.repository_id(),
                "Refusing to edit label of another repository"
            );
            return Err(AppError::not_found("label"));
        }

        label.merge(changes.name.as_deref(), changes.color.as_deref());

        // Not guarded against a concurrent edit or delete since the lookup.
        store
            .update(&label)
            .await
            .map_err(AppError::store("update_label"))?;
        Ok(label)
    }

    pub async fn delete(store: &dyn LabelStore, ctx: &RepoContext, label_id: i64) -> AppResult<()> {
        let grant = ctx.writer()?;

        let label = Self::lookup(store, label_id).await?;

        // The repository-scoped delete is what actually protects other
        // repositories' labels; the lookup above only feeds the log line.
        let removed = store
            .delete_by_repository_and_id(grant.repository_id(), label_id)
            .await
            .map_err(AppError::store("delete_label"))?;
        if !removed {
            tracing::debug!(
                label_id,
                repository_id = grant.repository_id(),
                "Scoped delete matched no label"
            );
        }

        tracing::trace!(label_id = label.id, name = %label.name, "Label deleted");
        Ok(())
    }

    async fn lookup(store: &dyn LabelStore, label_id: i64) -> AppResult<Label> {
        match store.find_by_id(label_id).await {
            Ok(label) => Ok(label),
            Err(StoreError::NotFound) => Err(AppError::not_found("label")),
            Err(e) => Err(AppError::store("find_label")(e)),
        }
    }
}
