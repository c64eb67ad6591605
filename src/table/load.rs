use super::types::RouteDef;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Either a bare list of routes or a document with a top-level `routes` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableDocument {
    List(Vec<RouteDef>),
    Wrapped { routes: Vec<RouteDef> },
}

impl TableDocument {
    fn into_routes(self) -> Vec<RouteDef> {
        match self {
            TableDocument::List(routes) | TableDocument::Wrapped { routes } => routes,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load a route table from a YAML (`.yaml`/`.yml`) or JSON file.
pub fn load_route_table(path: impl AsRef<Path>) -> anyhow::Result<Vec<RouteDef>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;
    parse_route_table(&content, is_yaml(path))
        .with_context(|| format!("failed to parse route table {}", path.display()))
}

/// Parse route table text. YAML is a superset of JSON, but JSON input goes
/// through `serde_json` for sharper error messages.
pub fn parse_route_table(content: &str, yaml: bool) -> anyhow::Result<Vec<RouteDef>> {
    let doc: TableDocument = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    let routes = doc.into_routes();

    tracing::debug!(
        top_level = routes.len(),
        total = routes.iter().map(RouteDef::node_count).sum::<usize>(),
        "Route table parsed"
    );
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_yaml() {
        let yaml = r#"
routes:
  - path: /api
    handler: api
    children:
      - path: users/:id
        file: user
"#;
        let routes = parse_route_table(yaml, true).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].children[0].handler, "user");
        assert_eq!(routes[0].node_count(), 2);
    }

    #[test]
    fn test_parse_bare_json_list() {
        let json = r#"[{"path": "/", "file": "home"}, {"handler": "index"}]"#;
        let routes = parse_route_table(json, false).unwrap();
        assert_eq!(routes[0].path, "/");
        assert_eq!(routes[1].path, "");
    }

    #[test]
    fn test_missing_handler_is_an_error() {
        assert!(parse_route_table(r#"[{"path": "/x"}]"#, false).is_err());
    }
}
