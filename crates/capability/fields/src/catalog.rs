//! 内置字段目录，每个分类一个有序序列。

use domain::{
    COUNTING_MAX, COUNTING_MEDIAS, COUNTING_MIN, EditableField, FieldCategory, PropertyValue,
    ViewKind,
};

const DEFAULT_NOMENCLATURES: &[&str] = &["TYP_GRP", "TECHNIQUE_OBS"];

const INFORMATION_NOMENCLATURES: &[&str] = &["METH_OBS", "ETA_BIO", "METH_DETERMIN"];
const INFORMATION_TRAILING_NOMENCLATURES: &[&str] = &[
    "STATUT_BIO",
    "OCC_COMPORTEMENT",
    "NATURALITE",
    "PREUVE_EXIST",
];

const COUNTING_NOMENCLATURES: &[&str] = &["STADE_VIE", "SEXE", "OBJ_DENBR", "TYP_DENBR"];

fn nomenclature_field(category: FieldCategory, mnemonic: &str) -> EditableField {
    EditableField::new(category, mnemonic, ViewKind::NomenclatureType).with_nomenclature_type(mnemonic)
}

/// 指定分类的内置字段（未应用设置，未填默认值）。
pub fn builtin_fields(category: FieldCategory) -> Vec<EditableField> {
    match category {
        FieldCategory::Default => DEFAULT_NOMENCLATURES
            .iter()
            .map(|mnemonic| nomenclature_field(category, mnemonic))
            .collect(),
        FieldCategory::Information => {
            let mut fields: Vec<EditableField> = INFORMATION_NOMENCLATURES
                .iter()
                .map(|mnemonic| nomenclature_field(category, mnemonic))
                .collect();
            fields.push(EditableField::new(category, "DETERMINER", ViewKind::TextSimple));
            fields.extend(
                INFORMATION_TRAILING_NOMENCLATURES
                    .iter()
                    .map(|mnemonic| nomenclature_field(category, mnemonic)),
            );
            fields.push(EditableField::new(category, "COMMENT", ViewKind::TextMultiple));
            fields
        }
        FieldCategory::Counting => {
            let mut fields: Vec<EditableField> = COUNTING_NOMENCLATURES
                .iter()
                .map(|mnemonic| nomenclature_field(category, mnemonic))
                .collect();
            fields.push(
                EditableField::new(category, COUNTING_MIN, ViewKind::MinMax)
                    .with_value(PropertyValue::number(COUNTING_MIN, Some(1))),
            );
            fields.push(
                EditableField::new(category, COUNTING_MAX, ViewKind::MinMax)
                    .with_value(PropertyValue::number(COUNTING_MAX, Some(1))),
            );
            fields.push(EditableField::new(category, COUNTING_MEDIAS, ViewKind::Media));
            fields
        }
    }
}
