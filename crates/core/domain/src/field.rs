//! 可编辑字段描述。
//!
//! 每次字段解析都会产出新的 `EditableField` 值对象，解析结果之间不共享可变状态。

use crate::DomainError;
use crate::property::PropertyValue;
use serde::{Deserialize, Serialize};

/// 字段所属分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldCategory {
    /// 表头级默认术语。
    Default,
    /// 物种观测信息。
    Information,
    /// 计数子记录。
    Counting,
}

impl FieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Default => "DEFAULT",
            FieldCategory::Information => "INFORMATION",
            FieldCategory::Counting => "COUNTING",
        }
    }
}

impl std::str::FromStr for FieldCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "DEFAULT" => Ok(FieldCategory::Default),
            "INFORMATION" => Ok(FieldCategory::Information),
            "COUNTING" => Ok(FieldCategory::Counting),
            _ => Err(DomainError::InvalidCategory(value.to_string())),
        }
    }
}

/// 渲染提示，核心逻辑只用于媒体字段排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewKind {
    Checkbox,
    NomenclatureType,
    Radio,
    SelectSimple,
    SelectMultiple,
    TextSimple,
    TextMultiple,
    Number,
    MinMax,
    Media,
}

impl ViewKind {
    pub fn is_media(&self) -> bool {
        matches!(self, ViewKind::Media)
    }
}

impl std::str::FromStr for ViewKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kind = match value.to_ascii_lowercase().as_str() {
            "checkbox" => ViewKind::Checkbox,
            "nomenclature_type" | "nomenclature" => ViewKind::NomenclatureType,
            "radio" => ViewKind::Radio,
            "select_simple" | "select" => ViewKind::SelectSimple,
            "select_multiple" | "multiselect" => ViewKind::SelectMultiple,
            "text_simple" | "text" => ViewKind::TextSimple,
            "text_multiple" | "textarea" => ViewKind::TextMultiple,
            "number" => ViewKind::Number,
            "min_max" | "bounds" => ViewKind::MinMax,
            "media" | "medias" => ViewKind::Media,
            _ => return Err(DomainError::InvalidViewKind(value.to_string())),
        };
        Ok(kind)
    }
}

/// 按字段编码覆盖可见性/默认性的部署设置。
///
/// `None` 表示保持目录中的原值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySettings {
    #[serde(alias = "key")]
    pub code: String,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub default: Option<bool>,
}

impl PropertySettings {
    pub fn new(code: impl Into<String>, visible: Option<bool>, default: Option<bool>) -> Self {
        Self {
            code: code.into(),
            visible,
            default,
        }
    }
}

/// 表单中可编辑的字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableField {
    pub category: FieldCategory,
    pub code: String,
    pub view_kind: ViewKind,
    pub linked_nomenclature_type: Option<String>,
    pub visible: bool,
    pub default: bool,
    pub is_additional_field: bool,
    pub label: Option<String>,
    pub allowed_values: Vec<PropertyValue>,
    pub value: Option<PropertyValue>,
    /// 值来自缓存默认值，不可随意再编辑。
    pub locked: bool,
}

impl EditableField {
    /// 内置目录字段：可见、默认、未锁定。
    pub fn new(category: FieldCategory, code: impl Into<String>, view_kind: ViewKind) -> Self {
        Self {
            category,
            code: code.into(),
            view_kind,
            linked_nomenclature_type: None,
            visible: true,
            default: true,
            is_additional_field: false,
            label: None,
            allowed_values: Vec::new(),
            value: None,
            locked: false,
        }
    }

    pub fn with_nomenclature_type(mut self, mnemonic: impl Into<String>) -> Self {
        self.linked_nomenclature_type = Some(mnemonic.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: PropertyValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_flags(mut self, visible: bool, default: bool) -> Self {
        self.visible = visible;
        self.default = default;
        self
    }

    /// 用缓存默认值锁定字段。
    pub fn lock_with(&mut self, value: PropertyValue) {
        self.value = Some(value);
        self.locked = true;
    }

    /// 当前值非空时返回。
    pub fn current_value(&self) -> Option<&PropertyValue> {
        self.value.as_ref().filter(|value| !value.is_empty())
    }
}
