use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 滚动快讯条目
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: u64,
    #[schema(example = "🎉 雪珑AI荣获2024年度最佳AI设计工作室奖")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// 分类（award / product / partnership / promotion / achievement / general …）
    #[serde(rename = "type", default = "default_kind")]
    #[schema(example = "general")]
    pub kind: String,
    /// 数值越小越靠前
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub(crate) fn default_kind() -> String {
    "general".to_string()
}

fn default_true() -> bool {
    true
}

/// 滚动展示参数
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsSettings {
    #[schema(example = 30)]
    pub scroll_speed: u64,
    /// 公开接口最多返回的条数
    #[schema(example = 5)]
    pub max_display_items: usize,
    pub auto_refresh: bool,
    /// 前端自动刷新间隔（毫秒）
    #[schema(example = 300000)]
    pub refresh_interval: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_delay: Option<u64>,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            scroll_speed: 30,
            max_display_items: 5,
            auto_refresh: true,
            refresh_interval: 300_000,
            animation_delay: None,
        }
    }
}

/// news 文档：条目 + 展示参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewsBoard {
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub settings: NewsSettings,
}

impl NewsBoard {
    /// 按 priority 升序（稳定排序）取出条目。
    ///
    /// 公开视图只保留启用条目并截断到 `maxDisplayItems`；管理视图返回全部。
    pub fn visible(&self, include_inactive: bool) -> Vec<NewsItem> {
        let mut items: Vec<NewsItem> = self
            .news
            .iter()
            .filter(|n| include_inactive || n.is_active)
            .cloned()
            .collect();
        items.sort_by_key(|n| n.priority);
        if !include_inactive {
            items.truncate(self.settings.max_display_items);
        }
        items
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NewsQuery {
    /// 为 true 时返回全部条目（含停用），不截断
    pub include_inactive: Option<bool>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NewsListResponse {
    pub news: Vec<NewsItem>,
    pub settings: NewsSettings,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    pub content: Option<String>,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub priority: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsSettingsRequest {
    pub scroll_speed: Option<u64>,
    pub max_display_items: Option<usize>,
    pub auto_refresh: Option<bool>,
    pub refresh_interval: Option<u64>,
    pub animation_delay: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, priority: i64, is_active: bool) -> NewsItem {
        NewsItem {
            id,
            content: format!("n{id}"),
            icon: None,
            kind: default_kind(),
            priority,
            is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn public_view_filters_sorts_and_truncates() {
        let board = NewsBoard {
            news: vec![
                item(1, 3, true),
                item(2, 1, false),
                item(3, 2, true),
                item(4, 2, true),
                item(5, 9, true),
            ],
            settings: NewsSettings {
                max_display_items: 3,
                ..NewsSettings::default()
            },
        };

        let ids: Vec<u64> = board.visible(false).iter().map(|n| n.id).collect();
        // 同 priority 保持原顺序
        assert_eq!(ids, vec![3, 4, 1]);

        let all: Vec<u64> = board.visible(true).iter().map(|n| n.id).collect();
        assert_eq!(all, vec![2, 3, 4, 1, 5]);
    }

    #[test]
    fn type_field_round_trips_under_its_json_name() {
        let raw = r#"{"id":1,"content":"c","type":"award","priority":1,"isActive":true,
            "createdAt":"2024-01-01T00:00:00Z"}"#;
        let n: NewsItem = serde_json::from_str(raw).expect("parse");
        assert_eq!(n.kind, "award");
        let v = serde_json::to_value(&n).expect("serialize");
        assert_eq!(v["type"], "award");
        assert!(v.get("icon").is_none());
    }
}
