use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, UsageError};

/// The quota report returned by the Copilot user endpoint. Info fields may be
/// absent or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    #[serde(default)]
    pub copilot_plan: Option<String>,
    #[serde(default)]
    pub access_type_sku: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chat_enabled: bool,
    #[serde(default)]
    pub assigned_date: Option<String>,
    #[serde(default)]
    pub quota_reset_date: Option<String>,
    #[serde(default)]
    pub organization_list: Option<Vec<String>>,
    pub quota_snapshots: QuotaSnapshots,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotaSnapshots {
    pub chat: QuotaStatus,
    pub completions: QuotaStatus,
    pub premium_interactions: QuotaStatus,
}

/// Usage of one quota category. The numeric fields are only meaningful when
/// `unlimited` is false; read them through [`QuotaStatus::usage`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotaStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub unlimited: bool,
    #[serde(default)]
    remaining: Option<f64>,
    #[serde(default)]
    entitlement: Option<f64>,
    #[serde(default)]
    percent_remaining: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overage_permitted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overage_count: f64,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric usage of a limited quota.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaUsage {
    pub remaining: f64,
    pub entitlement: f64,
    pub percent_remaining: f64,
}

impl QuotaStatus {
    pub fn unlimited() -> Self {
        Self {
            unlimited: true,
            ..Self::default()
        }
    }

    pub fn limited(remaining: f64, entitlement: f64, percent_remaining: f64) -> Self {
        Self {
            unlimited: false,
            remaining: Some(remaining),
            entitlement: Some(entitlement),
            percent_remaining: Some(percent_remaining),
            ..Self::default()
        }
    }

    /// `None` for unlimited quotas, whose counters are not reported.
    pub fn usage(&self) -> Option<QuotaUsage> {
        if self.unlimited {
            return None;
        }
        Some(QuotaUsage {
            remaining: self.remaining?,
            entitlement: self.entitlement?,
            percent_remaining: self.percent_remaining?,
        })
    }
}

impl QuotaSnapshots {
    /// Categories in display order, with their JSON keys.
    pub fn categories(&self) -> [(&'static str, &QuotaStatus); 3] {
        [
            ("chat", &self.chat),
            ("completions", &self.completions),
            ("premium_interactions", &self.premium_interactions),
        ]
    }
}

impl UsageSnapshot {
    /// Decode a fetched payload, rejecting limited quotas that lack counters.
    pub fn from_value(value: &Value) -> Result<Self> {
        let snapshot = Self::deserialize(value)?;

        for (key, quota) in snapshot.quota_snapshots.categories() {
            if !quota.unlimited && quota.usage().is_none() {
                return Err(UsageError::Decode(format!(
                    "quota '{key}' is limited but missing remaining/entitlement/percent_remaining"
                )));
            }
        }

        Ok(snapshot)
    }

    /// Organizations to list, or `None` when there are none.
    pub fn organizations(&self) -> Option<&[String]> {
        self.organization_list
            .as_deref()
            .filter(|orgs| !orgs.is_empty())
    }
}
