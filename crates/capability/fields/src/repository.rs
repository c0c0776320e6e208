//! 字段目录仓库：内置目录 + 默认术语 + 部署附加字段。

use crate::catalog::builtin_fields;
use crate::error::FieldError;
use crate::merge::apply_settings;
use async_trait::async_trait;
use domain::{
    EditableField, FieldCategory, PropertySettings, PropertyValue, TaxonomicRank, ViewKind,
};
use occtax_storage::{
    AdditionalFieldRecord, AdditionalFieldStore, DefaultNomenclatureValue, NomenclatureStore,
};
use std::sync::Arc;

/// 字段目录抽象，解析器通过它取基础字段与附加字段。
#[async_trait]
pub trait FieldCatalog: Send + Sync {
    /// 指定分类的字段目录（已应用设置）。
    async fn get_editable_fields(
        &self,
        category: FieldCategory,
        settings: &[PropertySettings],
    ) -> Result<Vec<EditableField>, FieldError>;

    /// 部署自定义的附加字段。
    async fn get_additional_fields(
        &self,
        dataset_id: Option<i64>,
        category: FieldCategory,
    ) -> Result<Vec<EditableField>, FieldError>;
}

/// 基于 storage 的字段目录。
#[derive(Clone)]
pub struct NomenclatureRepository {
    nomenclatures: Arc<dyn NomenclatureStore>,
    additional_fields: Arc<dyn AdditionalFieldStore>,
}

impl NomenclatureRepository {
    pub fn new(
        nomenclatures: Arc<dyn NomenclatureStore>,
        additional_fields: Arc<dyn AdditionalFieldStore>,
    ) -> Self {
        Self {
            nomenclatures,
            additional_fields,
        }
    }

    /// 指定术语类型在该分类等级下可选的值。
    pub async fn get_nomenclature_values(
        &self,
        mnemonic: &str,
        rank: &TaxonomicRank,
    ) -> Result<Vec<PropertyValue>, FieldError> {
        let values = self
            .nomenclatures
            .find_nomenclature_values(mnemonic, rank)
            .await
            .map_err(|err| FieldError::Catalog(err.to_string()))?;
        Ok(values
            .iter()
            .map(|nomenclature| nomenclature.to_property_value(mnemonic))
            .collect())
    }

    async fn map_additional_field(
        &self,
        record: AdditionalFieldRecord,
    ) -> Result<EditableField, FieldError> {
        let mut field = EditableField::new(record.category, &record.code, record.view_kind);
        field.is_additional_field = true;
        field.label = record.label.clone();

        match record.nomenclature_type.as_deref() {
            Some(mnemonic) => {
                field.linked_nomenclature_type = Some(mnemonic.to_string());
                field.allowed_values = self
                    .nomenclatures
                    .find_nomenclature_values_by_type(mnemonic)
                    .await
                    .map_err(|err| FieldError::AdditionalFields(err.to_string()))?
                    .iter()
                    .map(|nomenclature| nomenclature.to_property_value(&record.code))
                    .collect();
                field.value = record.default_value.as_deref().and_then(|default| {
                    field
                        .allowed_values
                        .iter()
                        .find(|value| nomenclature_matches(value, default))
                        .cloned()
                });
            }
            None => {
                field.allowed_values = record
                    .values
                    .iter()
                    .map(|candidate| {
                        scalar_value(&record.code, record.view_kind, &candidate.value)
                    })
                    .collect();
                field.value = record
                    .default_value
                    .as_deref()
                    .map(|default| scalar_value(&record.code, record.view_kind, default));
            }
        }
        Ok(field)
    }
}

fn nomenclature_matches(value: &PropertyValue, wanted: &str) -> bool {
    match value {
        PropertyValue::Nomenclature { label, id, .. } => {
            label.as_deref() == Some(wanted) || id.is_some_and(|id| id.to_string() == wanted)
        }
        _ => false,
    }
}

fn scalar_value(code: &str, view_kind: ViewKind, raw: &str) -> PropertyValue {
    match view_kind {
        ViewKind::Number | ViewKind::MinMax => PropertyValue::number(code, raw.trim().parse().ok()),
        _ => PropertyValue::text(code, Some(raw.to_string())),
    }
}

fn with_catalog_defaults(
    mut fields: Vec<EditableField>,
    defaults: &[DefaultNomenclatureValue],
) -> Vec<EditableField> {
    for field in &mut fields {
        let Some(mnemonic) = field.linked_nomenclature_type.as_deref() else {
            continue;
        };
        if let Some(default) = defaults.iter().find(|default| default.mnemonic == mnemonic) {
            field.value = Some(PropertyValue::nomenclature(
                &field.code,
                default.label.clone(),
                Some(default.nomenclature_id),
            ));
        }
    }
    fields
}

#[async_trait]
impl FieldCatalog for NomenclatureRepository {
    async fn get_editable_fields(
        &self,
        category: FieldCategory,
        settings: &[PropertySettings],
    ) -> Result<Vec<EditableField>, FieldError> {
        let defaults = self
            .nomenclatures
            .find_default_nomenclature_values()
            .await
            .map_err(|err| FieldError::Catalog(err.to_string()))?;
        let catalog = with_catalog_defaults(builtin_fields(category), &defaults);

        if settings.is_empty() || category == FieldCategory::Default {
            return Ok(catalog);
        }
        Ok(apply_settings(&catalog, settings))
    }

    async fn get_additional_fields(
        &self,
        dataset_id: Option<i64>,
        category: FieldCategory,
    ) -> Result<Vec<EditableField>, FieldError> {
        let records = self
            .additional_fields
            .find_additional_fields(dataset_id, category)
            .await
            .map_err(|err| FieldError::AdditionalFields(err.to_string()))?;
        let mut fields = Vec::with_capacity(records.len());
        for record in records {
            fields.push(self.map_additional_field(record).await?);
        }
        Ok(fields)
    }
}
