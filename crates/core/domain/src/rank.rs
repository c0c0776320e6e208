use serde::{Deserialize, Serialize};

/// 分类等级：(界, 类群)，任一分量可为通配 `Any`。
///
/// 默认值缓存以每个不同的 (界, 类群) 组合作为独立分桶，包括全通配组合。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxonomicRank {
    pub kingdom: String,
    pub group: String,
}

impl TaxonomicRank {
    /// 通配分量。
    pub const ANY: &'static str = "Any";

    pub fn new(kingdom: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            kingdom: kingdom.into(),
            group: group.into(),
        }
    }

    /// 全通配分类等级。
    pub fn any() -> Self {
        Self::new(Self::ANY, Self::ANY)
    }

    /// 仅指定界，类群为通配。
    pub fn kingdom(kingdom: impl Into<String>) -> Self {
        Self::new(kingdom, Self::ANY)
    }

    /// 由可选分量构造，缺失或空白的分量视为通配。
    pub fn from_parts(kingdom: Option<&str>, group: Option<&str>) -> Self {
        let normalize = |part: Option<&str>| match part.map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => Self::ANY.to_string(),
        };
        Self {
            kingdom: normalize(kingdom),
            group: normalize(group),
        }
    }

    pub fn is_any(&self) -> bool {
        self.kingdom == Self::ANY && self.group == Self::ANY
    }

    /// 判断声明在 `self` 上的值是否适用于 `target`。
    ///
    /// 通配分量匹配任意值。
    pub fn covers(&self, target: &TaxonomicRank) -> bool {
        let matches = |declared: &str, wanted: &str| declared == Self::ANY || declared == wanted;
        matches(&self.kingdom, &target.kingdom) && matches(&self.group, &target.group)
    }
}

impl Default for TaxonomicRank {
    fn default() -> Self {
        Self::any()
    }
}

impl std::fmt::Display for TaxonomicRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kingdom, self.group)
    }
}
