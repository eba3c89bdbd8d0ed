use crate::annotate::filter::UsableEvent;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub color: String,
    pub show_dot: bool,
}

/// Per-bucket adjustment; unset fields fall back to the default rule one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverride {
    pub color: Option<String>,
    pub show_dot: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSettings {
    pub default: StyleRule,
    pub past_events: Option<StyleOverride>,
    pub future_events: Option<StyleOverride>,
}

impl MarkerSettings {
    pub fn uniform(default: StyleRule) -> Self {
        Self {
            default,
            past_events: None,
            future_events: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Past,
    Future,
}

/// Events without a start date count as past.
pub fn bucket_for(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Bucket {
    match start {
        Some(start) if start >= now => Bucket::Future,
        _ => Bucket::Past,
    }
}

pub fn select_style(
    event: &UsableEvent,
    settings: &MarkerSettings,
    now: DateTime<Utc>,
) -> StyleRule {
    if settings.past_events.is_none() && settings.future_events.is_none() {
        return settings.default.clone();
    }
    let rule = match bucket_for(event.event().start_date, now) {
        Bucket::Past => settings.past_events.as_ref(),
        Bucket::Future => settings.future_events.as_ref(),
    };
    let Some(rule) = rule else {
        return settings.default.clone();
    };
    StyleRule {
        color: rule
            .color
            .clone()
            .unwrap_or_else(|| settings.default.color.clone()),
        show_dot: rule.show_dot.unwrap_or(settings.default.show_dot),
    }
}
