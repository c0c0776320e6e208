use domain::{EditableField, PropertySettings};

/// 把部署设置合并到字段目录上，返回新列表。
///
/// 同编码的覆盖项中 `None` 保留目录原值；没有覆盖项的字段保持不变。
pub fn apply_settings(base: &[EditableField], overrides: &[PropertySettings]) -> Vec<EditableField> {
    base.iter()
        .map(|field| {
            match overrides.iter().find(|settings| settings.code == field.code) {
                Some(settings) => field.clone().with_flags(
                    settings.visible.unwrap_or(field.visible),
                    settings.default.unwrap_or(field.default),
                ),
                None => field.clone(),
            }
        })
        .collect()
}
