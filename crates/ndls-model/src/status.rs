//! Status taxonomy for standards tracked by ndls.org.cn.
//!
//! The service reports status as a short raw phrase (field `a000`). The
//! mapping from raw phrase to [`StandardStatus`] is total: a value without
//! an entry resolves to [`StandardStatus::Unknown`], never an error.

use serde::Serialize;
use std::fmt;

/// Lifecycle status of a national standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum StandardStatus {
    /// 现行 — currently in force.
    Active,

    /// 被代替 — replaced by one or more newer standards.
    Superseded,

    /// 作废 — abolished without a designated replacement.
    Abolished,

    /// 废止 — formally repealed.
    Repealed,

    /// 已修订 — a revised edition has been issued.
    Revised,

    /// 历史 — historical record, no longer maintained.
    Historical,

    /// 未生效 — published but not yet in force.
    NotYetEffective,

    /// Anything the service reports that has no mapping, or a record the
    /// service could not be asked about.
    Unknown,
}

impl StandardStatus {
    /// Map a raw `a000` status phrase to a status.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "现行" => Self::Active,
            "被代替" => Self::Superseded,
            "作废" => Self::Abolished,
            "废止" => Self::Repealed,
            "已修订" => Self::Revised,
            "历史" => Self::Historical,
            "未生效" => Self::NotYetEffective,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label, worded the way the service's own UI words them.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "现行有效",
            Self::Superseded => "已被代替",
            Self::Abolished => "已作废",
            Self::Repealed => "已废止",
            Self::Revised => "已修订",
            Self::Historical => "历史标准",
            Self::NotYetEffective => "未生效",
            Self::Unknown => "未知",
        }
    }

    /// True when a follow-up detail lookup can yield replacement standards.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    /// True when the standard is no longer usable in any form.
    #[must_use]
    pub fn is_withdrawn(&self) -> bool {
        matches!(self, Self::Abolished | Self::Repealed | Self::Historical)
    }
}

impl fmt::Display for StandardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
