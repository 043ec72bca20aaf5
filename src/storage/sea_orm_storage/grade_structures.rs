//! 评分结构存储操作
//!
//! 结构与类别分两张表保存，写操作在同一事务中完成。

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::grade_categories::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as GradeCategories,
    Model as CategoryModel,
};
use crate::entity::grade_structures::{ActiveModel, Column, Entity as GradeStructures, Model};
use crate::errors::{GradebookError, Result};
use crate::models::grade_structures::{
    entities::GradeStructure,
    requests::{CreateGradeStructureRequest, GradeCategoryInput, UpdateGradeStructureRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建评分结构及其类别
    pub async fn create_grade_structure_impl(
        &self,
        class_id: i64,
        teacher_id: i64,
        req: CreateGradeStructureRequest,
    ) -> Result<GradeStructure> {
        let now = chrono::Utc::now().timestamp();
        let total_points = req
            .total_points
            .unwrap_or_else(|| req.categories.iter().map(|c| c.max_points).sum());

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let structure = ActiveModel {
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            name: Set(req.name),
            description: Set(req.description),
            total_points: Set(total_points),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradebookError::database_operation(format!("创建评分结构失败: {e}")))?;

        let mut categories = Vec::with_capacity(req.categories.len());
        for (index, input) in req.categories.into_iter().enumerate() {
            categories.push(insert_category(&txn, structure.id, index, input).await?);
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(structure.into_grade_structure(categories))
    }

    /// 通过 ID 获取评分结构
    pub async fn get_grade_structure_by_id_impl(
        &self,
        structure_id: i64,
    ) -> Result<Option<GradeStructure>> {
        let result = GradeStructures::find_by_id(structure_id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分结构失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.load_categories(model).await?)),
            None => Ok(None),
        }
    }

    /// 更新评分结构
    ///
    /// 提供 categories 时整体替换：带有本结构已有 id 的类别原地更新，
    /// 未出现的类别删除，其余作为新类别插入。
    pub async fn update_grade_structure_impl(
        &self,
        structure_id: i64,
        update: UpdateGradeStructureRequest,
    ) -> Result<Option<GradeStructure>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = GradeStructures::find_by_id(structure_id)
            .one(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分结构失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(structure_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(inputs) = update.categories {
            let current_ids: HashSet<i64> = GradeCategories::find()
                .filter(CategoryColumn::StructureId.eq(structure_id))
                .all(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("查询评分类别失败: {e}")))?
                .into_iter()
                .map(|c| c.id)
                .collect();

            let kept_ids: HashSet<i64> = inputs
                .iter()
                .filter_map(|c| c.id)
                .filter(|id| current_ids.contains(id))
                .collect();

            let removed: Vec<i64> = current_ids.difference(&kept_ids).copied().collect();
            if !removed.is_empty() {
                GradeCategories::delete_many()
                    .filter(CategoryColumn::Id.is_in(removed))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        GradebookError::database_operation(format!("删除评分类别失败: {e}"))
                    })?;
            }

            // 未显式给出总分时跟随新的类别满分之和
            if update.total_points.is_none() {
                model.total_points = Set(inputs.iter().map(|c| c.max_points).sum());
            }

            for (index, input) in inputs.into_iter().enumerate() {
                match input.id.filter(|id| kept_ids.contains(id)) {
                    Some(id) => {
                        CategoryActiveModel {
                            id: Set(id),
                            structure_id: Set(structure_id),
                            name: Set(input.name),
                            weight: Set(input.weight),
                            max_points: Set(input.max_points),
                            sort_order: Set(input.order.unwrap_or(index as i32)),
                        }
                        .update(&txn)
                        .await
                        .map_err(|e| {
                            GradebookError::database_operation(format!("更新评分类别失败: {e}"))
                        })?;
                    }
                    None => {
                        insert_category(&txn, structure_id, index, input).await?;
                    }
                }
            }
        }

        if let Some(total_points) = update.total_points {
            model.total_points = Set(total_points);
        }

        let structure = model
            .update(&txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新评分结构失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(self.load_categories(structure).await?))
    }

    /// 启用或停用评分结构
    pub async fn set_grade_structure_active_impl(
        &self,
        structure_id: i64,
        is_active: bool,
    ) -> Result<Option<GradeStructure>> {
        let result = GradeStructures::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(is_active))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(structure_id))
            .exec(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新评分结构状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_grade_structure_by_id_impl(structure_id).await
    }

    /// 列出班级的评分结构（最近更新在前）
    pub async fn list_grade_structures_impl(&self, class_id: i64) -> Result<Vec<GradeStructure>> {
        let structures = GradeStructures::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .find_with_related(GradeCategories)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分结构失败: {e}")))?;

        Ok(structures
            .into_iter()
            .map(|(structure, categories)| structure.into_grade_structure(categories))
            .collect())
    }

    /// 获取启用中的评分结构，多个时取最近更新的一个
    pub async fn get_active_grade_structure_impl(
        &self,
        class_id: i64,
    ) -> Result<Option<GradeStructure>> {
        let result = GradeStructures::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分结构失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.load_categories(model).await?)),
            None => Ok(None),
        }
    }

    /// 评分类别所属班级
    pub async fn get_grade_category_class_id_impl(&self, category_id: i64) -> Result<Option<i64>> {
        let result = GradeCategories::find_by_id(category_id)
            .find_also_related(GradeStructures)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分类别失败: {e}")))?;

        Ok(result.and_then(|(_, structure)| structure.map(|s| s.class_id)))
    }

    async fn load_categories(&self, structure: Model) -> Result<GradeStructure> {
        let categories = GradeCategories::find()
            .filter(CategoryColumn::StructureId.eq(structure.id))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评分类别失败: {e}")))?;

        Ok(structure.into_grade_structure(categories))
    }
}

async fn insert_category<C: ConnectionTrait>(
    conn: &C,
    structure_id: i64,
    index: usize,
    input: GradeCategoryInput,
) -> Result<CategoryModel> {
    CategoryActiveModel {
        structure_id: Set(structure_id),
        name: Set(input.name),
        weight: Set(input.weight),
        max_points: Set(input.max_points),
        sort_order: Set(input.order.unwrap_or(index as i32)),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| GradebookError::database_operation(format!("创建评分类别失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: Option<i64>, name: &str, weight: f64, max_points: f64) -> GradeCategoryInput {
        GradeCategoryInput {
            id,
            name: name.into(),
            weight,
            max_points,
            order: None,
        }
    }

    async fn create(storage: &SeaOrmStorage, class_id: i64, name: &str) -> GradeStructure {
        storage
            .create_grade_structure_impl(
                class_id,
                1,
                CreateGradeStructureRequest {
                    name: name.into(),
                    description: None,
                    total_points: None,
                    categories: vec![
                        category(None, "Homework", 40.0, 25.0),
                        category(None, "Exam", 60.0, 75.0),
                    ],
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_total_points_and_order() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let structure = create(&storage, 5, "Term 1").await;

        assert!(structure.is_active);
        assert_eq!(structure.total_points, 100.0);
        assert_eq!(structure.categories.len(), 2);
        assert_eq!(structure.categories[0].name, "Homework");
        assert_eq!(structure.categories[0].order, 0);
        assert_eq!(structure.categories[1].order, 1);

        let class_id = storage
            .get_grade_category_class_id_impl(structure.categories[0].id)
            .await
            .unwrap();
        assert_eq!(class_id, Some(5));
    }

    #[tokio::test]
    async fn test_update_replaces_categories() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let structure = create(&storage, 5, "Term 1").await;
        let homework_id = structure.categories[0].id;
        let exam_id = structure.categories[1].id;

        let updated = storage
            .update_grade_structure_impl(
                structure.id,
                UpdateGradeStructureRequest {
                    name: Some("Term 1 (revised)".into()),
                    description: None,
                    total_points: None,
                    categories: Some(vec![
                        category(Some(homework_id), "Homework", 30.0, 30.0),
                        category(None, "Project", 70.0, 70.0),
                    ]),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Term 1 (revised)");
        assert_eq!(updated.total_points, 100.0);
        assert_eq!(updated.categories.len(), 2);
        assert_eq!(updated.categories[0].id, homework_id);
        assert_eq!(updated.categories[0].weight, 30.0);
        assert_eq!(updated.categories[1].name, "Project");
        assert!(updated.categories.iter().all(|c| c.id != exam_id));
    }

    #[tokio::test]
    async fn test_update_missing_structure_returns_none() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let result = storage
            .update_grade_structure_impl(
                99,
                UpdateGradeStructureRequest {
                    name: Some("x".into()),
                    description: None,
                    total_points: None,
                    categories: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_active_structure_follows_toggle() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let first = create(&storage, 5, "Term 1").await;
        let second = create(&storage, 5, "Term 2").await;

        storage
            .set_grade_structure_active_impl(second.id, false)
            .await
            .unwrap();
        let active = storage
            .get_active_grade_structure_impl(5)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id, first.id);

        storage
            .set_grade_structure_active_impl(first.id, false)
            .await
            .unwrap();
        assert!(
            storage
                .get_active_grade_structure_impl(5)
                .await
                .unwrap()
                .is_none()
        );

        // 停用不删除
        assert_eq!(storage.list_grade_structures_impl(5).await.unwrap().len(), 2);
        assert!(
            storage
                .set_grade_structure_active_impl(404, true)
                .await
                .unwrap()
                .is_none()
        );
    }
}
