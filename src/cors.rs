use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsConfig;

/// 配置列表解析结果：是否出现 "*"，以及合法的具体值
struct ParsedList<T> {
    any: bool,
    values: Vec<T>,
}

fn parse_list<T>(label: &str, raw: &[String], parse: impl Fn(&str) -> Option<T>) -> ParsedList<T> {
    let mut parsed = ParsedList {
        any: false,
        values: Vec::new(),
    };
    for value in raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if value == "*" {
            parsed.any = true;
        } else if let Some(v) = parse(value) {
            parsed.values.push(v);
        } else {
            tracing::warn!("CORS {} 含无效值: {}", label, value);
        }
    }
    parsed
}

/// 根据配置构建 CORS 中间件；未启用或配置无效时返回 None
pub fn build_cors_layer(cors: &CorsConfig) -> Option<CorsLayer> {
    if !cors.enabled {
        return None;
    }

    let origins = parse_list("allowed_origins", &cors.allowed_origins, |v| {
        HeaderValue::from_str(v).ok()
    });
    if !origins.any && origins.values.is_empty() {
        tracing::warn!("CORS 已启用但 allowed_origins 为空，已跳过启用");
        return None;
    }
    let methods = parse_list("allowed_methods", &cors.allowed_methods, |v| {
        Method::from_bytes(v.to_ascii_uppercase().as_bytes()).ok()
    });
    let headers = parse_list("allowed_headers", &cors.allowed_headers, |v| {
        HeaderName::from_bytes(v.to_ascii_lowercase().as_bytes()).ok()
    });

    if cors.allow_credentials && (origins.any || methods.any || headers.any) {
        tracing::error!("CORS 配置无效：allow_credentials=true 不能与 \"*\" 同时使用，已跳过启用");
        return None;
    }

    let mut layer = if origins.any {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins.values)
    };

    if methods.any {
        layer = layer.allow_methods(Any);
    } else if !methods.values.is_empty() {
        layer = layer.allow_methods(methods.values);
    }

    if headers.any {
        layer = layer.allow_headers(Any);
    } else if !headers.values.is_empty() {
        layer = layer.allow_headers(headers.values);
    }

    if cors.allow_credentials {
        layer = layer.allow_credentials(true);
    }
    if let Some(secs) = cors.max_age_secs.filter(|s| *s > 0) {
        layer = layer.max_age(Duration::from_secs(secs));
    }

    Some(layer)
}

#[cfg(test)]
mod tests {
    use super::{build_cors_layer, parse_list};
    use crate::config::CorsConfig;
    use axum::http::Method;

    #[test]
    fn default_config_allows_any_origin() {
        assert!(build_cors_layer(&CorsConfig::default()).is_some());
    }

    #[test]
    fn disabled_or_empty_origins_skip_layer() {
        let disabled = CorsConfig {
            enabled: false,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&disabled).is_none());

        let empty = CorsConfig {
            allowed_origins: Vec::new(),
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&empty).is_none());
    }

    #[test]
    fn credentials_with_wildcard_are_rejected() {
        let cors = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cors).is_none());
    }

    #[test]
    fn methods_are_normalized() {
        let raw = vec!["get".to_string(), " put ".to_string(), "*".to_string()];
        let parsed = parse_list("allowed_methods", &raw, |v| {
            Method::from_bytes(v.to_ascii_uppercase().as_bytes()).ok()
        });
        assert!(parsed.any);
        assert_eq!(parsed.values, vec![Method::GET, Method::PUT]);
    }
}
