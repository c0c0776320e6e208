use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 字段编码 -> 字段值。
///
/// 使用 BTreeMap 保证序列化顺序稳定。
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// 单个字段的当前值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// 术语引用（受控词表条目）。
    Nomenclature {
        code: String,
        label: Option<String>,
        id: Option<i64>,
    },
    Number {
        code: String,
        value: Option<i64>,
    },
    Text {
        code: String,
        value: Option<String>,
    },
    /// 媒体文件引用列表。
    Media {
        code: String,
        #[serde(default)]
        files: Vec<String>,
    },
}

impl PropertyValue {
    pub fn nomenclature(code: impl Into<String>, label: Option<String>, id: Option<i64>) -> Self {
        PropertyValue::Nomenclature {
            code: code.into(),
            label,
            id,
        }
    }

    pub fn number(code: impl Into<String>, value: Option<i64>) -> Self {
        PropertyValue::Number {
            code: code.into(),
            value,
        }
    }

    pub fn text(code: impl Into<String>, value: Option<String>) -> Self {
        PropertyValue::Text {
            code: code.into(),
            value,
        }
    }

    pub fn media(code: impl Into<String>, files: Vec<String>) -> Self {
        PropertyValue::Media {
            code: code.into(),
            files,
        }
    }

    /// 字段编码。
    pub fn code(&self) -> &str {
        match self {
            PropertyValue::Nomenclature { code, .. }
            | PropertyValue::Number { code, .. }
            | PropertyValue::Text { code, .. }
            | PropertyValue::Media { code, .. } => code,
        }
    }

    /// 值是否为空（按变体判断载荷）。
    ///
    /// - 术语：未选择条目（id 为空）
    /// - 数字：无值
    /// - 文本：无值或空字符串
    /// - 媒体：文件列表为空
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Nomenclature { id, .. } => id.is_none(),
            PropertyValue::Number { value, .. } => value.is_none(),
            PropertyValue::Text { value, .. } => value.as_deref().is_none_or(str::is_empty),
            PropertyValue::Media { files, .. } => files.is_empty(),
        }
    }
}
