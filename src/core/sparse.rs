//! # Sparse Field Projection / 稀疏字段投影
//!
//! Compares a job's concrete settings with the global default record and keeps
//! only the fields that differ. Every job entry type goes through `JobOverrides::diff`,
//! so the emitted matrix stays minimal and diff-friendly across runs.
//!
//! 将作业的具体设置与全局默认记录比较，只保留不同的字段。
//! 所有作业条目类型都经过 `JobOverrides::diff`，使输出矩阵保持最小并便于比较。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::metadata::JobSettings;

/// The optional fields of a job entry. `None` means "same as the default".
/// 作业条目的可选字段。`None` 表示“与默认值相同”。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_test_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_nugets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_test_sdk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_playwright_install: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_session_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_hang_timeout: Option<String>,
    #[serde(default, rename = "supportedOSes", skip_serializing_if = "Option::is_none")]
    pub supported_oses: Option<Vec<String>>,
}

impl JobOverrides {
    /// Projects `actual` onto the fields that differ from `defaults`.
    ///
    /// Scalars use value equality. `supportedOSes` uses set equality, ignoring
    /// order and duplicates; when it differs it is emitted sorted and deduplicated.
    ///
    /// 将 `actual` 投影到与 `defaults` 不同的字段上。
    /// 标量按值比较；`supportedOSes` 按集合比较，忽略顺序与重复项。
    pub fn diff(actual: &JobSettings, defaults: &JobSettings) -> Self {
        let actual_oses = as_set(&actual.supported_oses);
        let supported_oses = (actual_oses != as_set(&defaults.supported_oses))
            .then(|| actual_oses.into_iter().map(str::to_string).collect());

        Self {
            extra_test_args: differing(&actual.extra_test_args, &defaults.extra_test_args),
            requires_nugets: differing(&actual.requires_nugets, &defaults.requires_nugets),
            requires_test_sdk: differing(&actual.requires_test_sdk, &defaults.requires_test_sdk),
            enable_playwright_install: differing(
                &actual.enable_playwright_install,
                &defaults.enable_playwright_install,
            ),
            test_session_timeout: differing(
                &actual.test_session_timeout,
                &defaults.test_session_timeout,
            ),
            test_hang_timeout: differing(&actual.test_hang_timeout, &defaults.test_hang_timeout),
            supported_oses,
        }
    }

    /// `true` when every field equals the default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn differing<T: PartialEq + Clone>(actual: &T, default: &T) -> Option<T> {
    (actual != default).then(|| actual.clone())
}

fn as_set(values: &[String]) -> BTreeSet<&str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect()
}
