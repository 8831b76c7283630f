// Human-readable projections of a usage snapshot (pt-BR labels).

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use super::usage::{QuotaStatus, UsageSnapshot};

const UNLIMITED: &str = "Ilimitado";

/// Shown for info fields the API sent as `null` or left out.
const MISSING: &str = "null";

/// Detailed multi-section report, dates in local time.
pub fn format_usage(data: &UsageSnapshot) -> String {
    format_usage_in(data, &Local)
}

/// Condensed summary, dates in local time.
pub fn format_summary(data: &UsageSnapshot) -> String {
    format_summary_in(data, &Local)
}

/// Detailed report with dates rendered in `tz`.
pub fn format_usage_in<Tz: TimeZone>(data: &UsageSnapshot, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let quotas = &data.quota_snapshots;
    let mut lines = Vec::new();

    lines.push("🤖 **GitHub Copilot - Status de Uso**".to_owned());
    lines.push(String::new());
    lines.push("📋 **Informações Gerais:**".into());
    lines.push(format!("• Plano: {}", or_missing(&data.copilot_plan)));
    lines.push(format!(
        "• Tipo de acesso: {}",
        or_missing(&data.access_type_sku)
    ));
    lines.push(format!("• Chat habilitado: {}", yes_no(data.chat_enabled)));
    lines.push(format!(
        "• Data de atribuição: {}",
        format_datetime(data.assigned_date.as_deref(), tz)
    ));
    lines.push(format!(
        "• Próxima renovação de cota: {}",
        format_datetime(data.quota_reset_date.as_deref(), tz)
    ));
    lines.push(String::new());
    lines.push("📊 **Cotas de Uso:**".into());

    for (title, quota) in [
        ("🗨️ **Chat:**", &quotas.chat),
        ("💡 **Completions (Autocompletar):**", &quotas.completions),
        ("⭐ **Interações Premium:**", &quotas.premium_interactions),
    ] {
        lines.push(String::new());
        lines.push(title.into());
        lines.push(format!("• Status: {}", quota_status(quota)));
        lines.push(format!(
            "• Overage permitido: {}",
            yes_no(quota.overage_permitted)
        ));
        lines.push(format!(
            "• Contador de overage: {}",
            format_count(quota.overage_count)
        ));
    }

    if let Some(orgs) = data.organizations() {
        lines.push(String::new());
        lines.push("🏢 **Organizações:**".into());
        lines.extend(orgs.iter().map(|org| format!("• {org}")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Summary with the reset date rendered in `tz`.
pub fn format_summary_in<Tz: TimeZone>(data: &UsageSnapshot, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let quotas = &data.quota_snapshots;
    let mut lines = Vec::new();

    lines.push(format!(
        "📊 **Resumo GitHub Copilot** ({})",
        or_missing(&data.copilot_plan)
    ));
    lines.push(String::new());

    if let Some(usage) = quotas.premium_interactions.usage() {
        lines.push(format!(
            "⭐ **Interações Premium**: {}/{} restantes ({}%)",
            format_count(usage.remaining),
            format_count(usage.entitlement),
            format_percent(usage.percent_remaining)
        ));
    }

    lines.push(format!("🗨️ **Chat**: {}", quota_short(&quotas.chat)));
    lines.push(format!(
        "💡 **Completions**: {}",
        quota_short(&quotas.completions)
    ));
    lines.push(String::new());
    lines.push(format!(
        "📅 **Renovação**: {}",
        format_date(data.quota_reset_date.as_deref(), tz)
    ));

    lines.join("\n")
}

fn quota_status(quota: &QuotaStatus) -> String {
    match quota.usage() {
        None => UNLIMITED.into(),
        Some(usage) => format!(
            "{}/{} ({}% restante)",
            format_count(usage.remaining),
            format_count(usage.entitlement),
            format_percent(usage.percent_remaining)
        ),
    }
}

fn quota_short(quota: &QuotaStatus) -> String {
    match quota.usage() {
        None => UNLIMITED.into(),
        Some(usage) => format!(
            "{}/{}",
            format_count(usage.remaining),
            format_count(usage.entitlement)
        ),
    }
}

fn or_missing(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(MISSING)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Sim" } else { "Não" }
}

/// Integral counts print without a fractional part.
fn format_count(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// One decimal place. Exact binary ties round away from zero (12.25 gives
/// 12.3), everything else rounds to nearest.
fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Every finite f64 has a terminating decimal expansion of at most 1074
    // fractional digits.
    let exact = format!("{:.1100}", value.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{value:.1}");
    };
    let tie = frac[1..].starts_with('5') && frac[2..].bytes().all(|b| b == b'0');
    if !tie {
        return format!("{value:.1}");
    }

    // Increment the last kept digit of "<int><first decimal>".
    let mut digits: Vec<u8> = int_part.bytes().chain(frac.bytes().take(1)).collect();
    let mut carry = true;
    for d in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let (whole, decimal) = digits.split_at(digits.len() - 1);
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{sign}{}.{}",
        String::from_utf8_lossy(whole),
        String::from_utf8_lossy(decimal)
    )
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as UTC
/// midnight).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// pt-BR short date and time, e.g. `01/09/2025, 00:00`.
fn format_datetime<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = raw else {
        return MISSING.into();
    };
    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(tz).format("%d/%m/%Y, %H:%M").to_string(),
        None => raw.to_owned(),
    }
}

/// pt-BR short date, e.g. `01/09/2025`.
fn format_date<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = raw else {
        return MISSING.into();
    };
    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(tz).format("%d/%m/%Y").to_string(),
        None => raw.to_owned(),
    }
}
