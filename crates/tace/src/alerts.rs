//! Threshold alerts over monthly summaries.

use serde::{Deserialize, Serialize};

use crate::metrics::MonthSummary;

/// Severity, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

/// Rate thresholds, in percent and percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Below this rate a metric is critical.
    pub critical: f64,
    /// Below this rate a metric needs attention.
    pub warning: f64,
    /// A month-over-month change below this is a sharp decline.
    pub trend_warning: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical: 70.0,
            warning: 85.0,
            trend_warning: -5.0,
        }
    }
}

/// Qualitative band of a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBand {
    Good,
    Average,
    Low,
}

impl RateBand {
    /// good ≥ 85, average ≥ 70, low otherwise.
    pub fn classify(rate: f64) -> Self {
        Self::classify_with(rate, &AlertThresholds::default())
    }

    pub fn classify_with(rate: f64, thresholds: &AlertThresholds) -> Self {
        if rate >= thresholds.warning {
            RateBand::Good
        } else if rate >= thresholds.critical {
            RateBand::Average
        } else {
            RateBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

fn check_rate(
    alerts: &mut Vec<Alert>,
    month: &str,
    metric: &str,
    rate: f64,
    trend: Option<f64>,
    thresholds: &AlertThresholds,
) {
    let alert = |level, title: String, message: String| Alert {
        level,
        title,
        message,
        month: month.to_string(),
        metric: Some(metric.to_string()),
        value: Some(rate),
    };

    if rate < thresholds.critical {
        alerts.push(alert(
            AlertLevel::Critical,
            format!("{metric} critique"),
            format!(
                "Le taux de {metric} est de {rate:.1}%, bien en dessous du seuil recommandé de {}%.",
                thresholds.critical
            ),
        ));
    } else if rate < thresholds.warning {
        alerts.push(alert(
            AlertLevel::Warning,
            format!("{metric} en baisse"),
            format!(
                "Le taux de {metric} est de {rate:.1}%, légèrement en dessous du seuil optimal de {}%.",
                thresholds.warning
            ),
        ));
    } else if let Some(trend) = trend.filter(|t| *t < thresholds.trend_warning) {
        alerts.push(alert(
            AlertLevel::Warning,
            format!("{metric} en forte baisse"),
            format!(
                "Le taux de {metric} a diminué de {:.1}% par rapport au mois précédent.",
                trend.abs()
            ),
        ));
    }
}

/// Number of consecutive month-over-month declines of the global real rate
/// across the last three summaries.
fn consecutive_declines(summaries: &[MonthSummary]) -> usize {
    if summaries.len() < 3 {
        return 0;
    }
    let last_three = &summaries[summaries.len() - 3..];
    let mut declines = 0;
    for pair in last_three.windows(2) {
        match (pair[0].totals, pair[1].totals) {
            (Some(prev), Some(cur)) if cur.real_rate < prev.real_rate => declines += 1,
            _ => declines = 0,
        }
    }
    declines
}

/// Alerts for the most recent summary, most urgent first.
///
/// `summaries` must be in chronological order (see `merge_monthly_summaries`).
/// Metrics without data are not checked.
pub fn generate_alerts(summaries: &[MonthSummary], thresholds: &AlertThresholds) -> Vec<Alert> {
    let Some(current) = summaries.last() else {
        return Vec::new();
    };
    let month = current.month.to_string();
    let trends = current.trends.unwrap_or_default();
    let mut alerts = Vec::new();

    if let Some(totals) = current.totals {
        check_rate(
            &mut alerts,
            &month,
            "Taux global réel",
            totals.real_rate,
            trends.real_rate,
            thresholds,
        );
    }

    let specific_trends = [
        trends.front_ecommerce_rate,
        trends.back_ecommerce_rate,
        trends.front_sur_mesure_rate,
        trends.back_sur_mesure_rate,
    ];
    for ((metric, rate), trend) in current.specific.labelled().into_iter().zip(specific_trends) {
        if let Some(rate) = rate {
            check_rate(&mut alerts, &month, metric, rate, trend, thresholds);
        }
    }

    let declines = consecutive_declines(summaries);
    if declines >= 2 {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            title: "Tendance négative prolongée".to_string(),
            message: format!(
                "Le taux d'activité global diminue depuis {declines} mois consécutifs."
            ),
            month: month.clone(),
            metric: Some("Tendance globale".to_string()),
            value: None,
        });
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            level: AlertLevel::Info,
            title: "Excellentes performances".to_string(),
            message: format!(
                "Tous les taux d'activité de {month} sont au-dessus des seuils recommandés."
            ),
            month,
            metric: None,
            value: None,
        });
    }

    alerts.sort_by_key(|a| a.level);
    alerts
}
