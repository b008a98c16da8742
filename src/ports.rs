use k8s_openapi::api::core::v1::ContainerPort;
use serde_json::{Map, Value};

/// Transform image ports to the Kubernetes container port structure.
///
/// `{ "3306/tcp": {} }` -> `ContainerPort { container_port: 3306, protocol: "TCP" }`.
/// Keys without a protocol default to tcp. Keys whose port part has no numeric
/// prefix are skipped with a warning.
pub fn ports_from_spec(spec: &Map<String, Value>) -> Vec<ContainerPort> {
    spec.keys()
        .filter_map(|key| {
            let mut parts = key.split('/');
            let port = parts.next().unwrap_or_default();
            let protocol = parts.next().unwrap_or("tcp");
            match parse_int_prefix(port) {
                Some(container_port) => Some(ContainerPort {
                    container_port,
                    protocol: Some(protocol.to_uppercase()),
                    ..Default::default()
                }),
                None => {
                    tracing::warn!(port = %key, "Unrecognized image port format");
                    None
                }
            }
        })
        .collect()
}

/// Read the exposed ports from an ImageStreamTag's image metadata.
pub fn get_ports(image_stream_tag: &Value) -> Vec<ContainerPort> {
    let metadata = image_stream_tag.pointer("/image/dockerImageMetadata");
    let spec = metadata
        .and_then(|m| m.pointer("/Config/ExposedPorts"))
        .filter(|v| !v.is_null())
        .or_else(|| metadata.and_then(|m| m.pointer("/ContainerConfig/ExposedPorts")));

    match spec.and_then(Value::as_object) {
        Some(map) => ports_from_spec(map),
        None => Vec::new(),
    }
}

/// Port name using the same convention as `oc new-app`: `8080-tcp`.
pub fn port_name(port: &ContainerPort) -> String {
    format!(
        "{}-{}",
        port.container_port,
        port.protocol.as_deref().unwrap_or("TCP")
    )
    .to_lowercase()
}

/// Integer-prefix parse: skips leading whitespace, accepts a sign, reads digits.
/// `"8080abc"` parses as 8080; `"abc"` does not parse.
fn parse_int_prefix(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    format!("{sign}{digits}").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_port_with_protocol() {
        let ports = ports_from_spec(&spec(json!({"3306/tcp": {}})));
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].container_port, 3306);
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_port_defaults_to_tcp() {
        let ports = ports_from_spec(&spec(json!({"80": {}})));
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].container_port, 80);
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_unparseable_port_is_skipped() {
        assert!(ports_from_spec(&spec(json!({"bad": {}}))).is_empty());
        assert!(ports_from_spec(&spec(json!({"/udp": {}}))).is_empty());
    }

    #[test]
    fn test_udp_and_order_preserved() {
        let ports = ports_from_spec(&spec(json!({
            "8443/tcp": {},
            "bad/tcp": {},
            "53/udp": {},
            "8080/tcp": {}
        })));
        let got: Vec<(i32, &str)> = ports
            .iter()
            .map(|p| (p.container_port, p.protocol.as_deref().unwrap()))
            .collect();
        assert_eq!(got, vec![(8443, "TCP"), (53, "UDP"), (8080, "TCP")]);
    }

    #[test]
    fn test_extra_segments_ignored() {
        let ports = ports_from_spec(&spec(json!({"8080/tcp/extra": {}})));
        assert_eq!(ports[0].container_port, 8080);
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_numeric_prefix() {
        let ports = ports_from_spec(&spec(json!({"8080abc/tcp": {}})));
        assert_eq!(ports[0].container_port, 8080);
        assert_eq!(parse_int_prefix(" 42"), Some(42));
        assert_eq!(parse_int_prefix("99999999999"), None);
    }

    #[test]
    fn test_get_ports_prefers_config() {
        let tag = json!({
            "image": {
                "dockerImageMetadata": {
                    "Config": {"ExposedPorts": {"8080/tcp": {}}},
                    "ContainerConfig": {"ExposedPorts": {"9090/tcp": {}}}
                }
            }
        });
        let ports = get_ports(&tag);
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].container_port, 8080);
    }

    #[test]
    fn test_get_ports_falls_back_to_container_config() {
        let tag = json!({
            "image": {
                "dockerImageMetadata": {
                    "Config": {},
                    "ContainerConfig": {"ExposedPorts": {"9090/tcp": {}}}
                }
            }
        });
        assert_eq!(get_ports(&tag)[0].container_port, 9090);
    }

    #[test]
    fn test_get_ports_missing_metadata() {
        assert!(get_ports(&json!({})).is_empty());
    }

    #[test]
    fn test_port_name() {
        let port = ContainerPort {
            container_port: 8080,
            protocol: Some("TCP".into()),
            ..Default::default()
        };
        assert_eq!(port_name(&port), "8080-tcp");
    }
}
