//! 可编辑字段解析器。
//!
//! 解析顺序：目录字段（应用设置）→ 追加附加字段 → 媒体字段稳定后置 →
//! 用缓存默认值覆盖并锁定同编码字段。

use crate::error::FieldError;
use crate::repository::FieldCatalog;
use domain::{EditableField, FieldCategory, PropertySettings, PropertyValue, TaxonomicRank};
use occtax_config::NomenclatureSettings;
use occtax_storage::DefaultPropertyValueStore;
use std::sync::Arc;

/// 把媒体字段稳定地移到所有非媒体字段之后。
pub fn sort_media_last(fields: &mut [EditableField]) {
    fields.sort_by_key(|field| field.view_kind.is_media());
}

#[derive(Clone)]
pub struct EditableFieldResolver {
    catalog: Arc<dyn FieldCatalog>,
    defaults: Arc<dyn DefaultPropertyValueStore>,
    load_additional_fields: bool,
    save_default_values: bool,
}

impl EditableFieldResolver {
    pub fn new(
        catalog: Arc<dyn FieldCatalog>,
        defaults: Arc<dyn DefaultPropertyValueStore>,
    ) -> Self {
        Self {
            catalog,
            defaults,
            load_additional_fields: true,
            save_default_values: true,
        }
    }

    /// 按部署设置决定是否加载附加字段、是否记住用户选择的值。
    pub fn with_settings(mut self, settings: &NomenclatureSettings) -> Self {
        self.load_additional_fields = settings.additional_fields;
        self.save_default_values = settings.save_default_values;
        self
    }

    /// 解析指定分类的字段列表。
    ///
    /// 只有目录错误会使解析失败；附加字段与默认值的错误按空结果处理。
    pub async fn resolve(
        &self,
        dataset_id: Option<i64>,
        category: FieldCategory,
        settings: &[PropertySettings],
        rank: Option<&TaxonomicRank>,
    ) -> Result<Vec<EditableField>, FieldError> {
        let mut fields = self.catalog.get_editable_fields(category, settings).await?;

        let additional = if self.load_additional_fields {
            self.catalog.get_additional_fields(dataset_id, category).await
        } else {
            Ok(Vec::new())
        };
        match additional {
            Ok(additional) => fields.extend(additional),
            Err(err) => {
                tracing::warn!(
                    target: "occtax.fields",
                    category = category.as_str(),
                    dataset_id = ?dataset_id,
                    error = %err,
                    "additional_fields_unavailable"
                );
            }
        }

        sort_media_last(&mut fields);

        let rank = rank.cloned().unwrap_or_else(TaxonomicRank::any);
        let cached = match self.defaults.get(&rank).await {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!(
                    target: "occtax.fields",
                    rank = %rank,
                    error = %err,
                    "default_values_unavailable"
                );
                Vec::new()
            }
        };
        for field in &mut fields {
            if let Some(value) = cached.iter().find(|value| value.code() == field.code) {
                field.lock_with(value.clone());
            }
        }

        tracing::debug!(
            target: "occtax.fields",
            category = category.as_str(),
            count = fields.len(),
            "editable_fields_resolved"
        );
        Ok(fields)
    }

    /// 记住字段的当前非空值，作为该分类等级下次解析的默认值。
    ///
    /// 部署关闭了记忆功能时不写入。
    pub async fn remember_values(
        &self,
        rank: &TaxonomicRank,
        fields: &[EditableField],
    ) -> Result<(), FieldError> {
        if !self.save_default_values {
            return Ok(());
        }
        let values: Vec<PropertyValue> = fields
            .iter()
            .filter_map(|field| field.current_value())
            .cloned()
            .collect();
        self.defaults
            .set(rank, &values)
            .await
            .map_err(|err| FieldError::DefaultValues(err.to_string()))
    }

    /// 忘记该分类等级下指定编码的默认值。
    pub async fn forget_values(&self, rank: &TaxonomicRank, codes: &[&str]) -> Result<(), FieldError> {
        self.defaults
            .clear(rank, codes)
            .await
            .map_err(|err| FieldError::DefaultValues(err.to_string()))
    }
}
