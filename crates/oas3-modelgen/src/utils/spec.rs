use std::{ffi::OsStr, path::Path};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::document::OpenApiDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let file = AsyncMmapFile::open(path).await?;

    Ok(Self { file, format })
  }

  pub fn format(&self) -> SpecFormat {
    self.format
  }

  pub fn parse(&self) -> anyhow::Result<OpenApiDocument> {
    parse_document(self.file.as_slice(), self.format)
  }
}

/// Deserializes a document, reporting the path of the first offending node on failure.
pub fn parse_document(bytes: &[u8], format: SpecFormat) -> anyhow::Result<OpenApiDocument> {
  match format {
    SpecFormat::Json => {
      let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
      serde_path_to_error::deserialize(deserializer)
        .map_err(|err| anyhow::anyhow!("invalid OpenAPI JSON at '{}': {}", err.path(), err.inner()))
    }
    SpecFormat::Yaml => {
      let deserializer = serde_yaml::Deserializer::from_slice(bytes);
      serde_path_to_error::deserialize(deserializer)
        .map_err(|err| anyhow::anyhow!("invalid OpenAPI YAML at '{}': {}", err.path(), err.inner()))
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  const PETSTORE_YAML: &str = r"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      responses:
        '200':
          description: ok
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
        id:
          type: integer
";

  #[test]
  fn test_spec_format_from_extension() {
    assert_eq!(SpecFormat::from_extension("yaml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("YML"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("json"), SpecFormat::Json);
    assert_eq!(SpecFormat::from_extension("txt"), SpecFormat::Json);
  }

  #[test]
  fn test_parse_yaml_preserves_property_order() {
    let doc = parse_document(PETSTORE_YAML.as_bytes(), SpecFormat::Yaml).unwrap();
    let pet = doc.schema("Pet").and_then(|s| s.as_item()).unwrap();
    let names: Vec<_> = pet.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["name", "id"]);
    assert!(doc.paths.contains_key("/pets"));
  }

  #[test]
  fn test_parse_json_reports_path() {
    let bad = br#"{"openapi": "3.0.0", "paths": {"/x": {"get": {"operationId": ["list"]}}}}"#;
    let err = parse_document(bad, SpecFormat::Json).unwrap_err();
    assert!(err.to_string().contains("paths./x.get.operationId"), "unexpected error: {err}");
  }

  #[tokio::test]
  async fn test_loader_opens_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(PETSTORE_YAML.as_bytes()).unwrap();

    let loader = SpecLoader::open(file.path()).await.unwrap();
    assert_eq!(loader.format(), SpecFormat::Yaml);
    let doc = loader.parse().unwrap();
    assert_eq!(doc.info.title, "Petstore");
  }
}
