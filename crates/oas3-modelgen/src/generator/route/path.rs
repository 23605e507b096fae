use strum::Display;

use crate::generator::errors::{ModelgenError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PathTemplateError {
  #[strum(to_string = "path must start with '/'")]
  MissingLeadingSlash,
  #[strum(to_string = "unclosed '{{' at position {position} in segment '{segment}'")]
  UnclosedBrace { segment: String, position: usize },
  #[strum(to_string = "empty parameter '{{}}' in segment '{segment}'")]
  EmptyParameter { segment: String },
  #[strum(to_string = "unmatched '}}' at position {position} in segment '{segment}'")]
  UnmatchedClosingBrace { segment: String, position: usize },
  #[strum(to_string = "nested '{{' at position {position} in segment '{segment}'")]
  NestedBraces { segment: String, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentPart {
  Literal(String),
  Param(String),
}

/// One `/`-separated piece of a path template.
///
/// A segment with at least one `{name}` placeholder is a parameter segment,
/// including mixed ones such as `{name}.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
  parts: Vec<SegmentPart>,
}

impl PathSegment {
  pub fn parse(segment: &str) -> std::result::Result<Self, PathTemplateError> {
    let mut parts = vec![];
    let mut rest = segment;
    let mut offset = 0;

    while let Some(open_pos) = rest.find('{') {
      if let Some(stray_close) = rest[..open_pos].find('}') {
        return Err(PathTemplateError::UnmatchedClosingBrace {
          segment: segment.to_string(),
          position: offset + stray_close,
        });
      }
      if open_pos > 0 {
        parts.push(SegmentPart::Literal(rest[..open_pos].to_string()));
      }

      let after_open = &rest[open_pos + 1..];
      let Some(close_pos) = after_open.find('}') else {
        return Err(PathTemplateError::UnclosedBrace {
          segment: segment.to_string(),
          position: offset + open_pos,
        });
      };
      if let Some(nested) = after_open[..close_pos].find('{') {
        return Err(PathTemplateError::NestedBraces {
          segment: segment.to_string(),
          position: offset + open_pos + 1 + nested,
        });
      }

      let name = after_open[..close_pos].trim();
      if name.is_empty() {
        return Err(PathTemplateError::EmptyParameter {
          segment: segment.to_string(),
        });
      }
      parts.push(SegmentPart::Param(name.to_string()));

      let consumed = open_pos + close_pos + 2;
      offset += consumed;
      rest = &rest[consumed..];
    }

    if let Some(stray_close) = rest.find('}') {
      return Err(PathTemplateError::UnmatchedClosingBrace {
        segment: segment.to_string(),
        position: offset + stray_close,
      });
    }
    if !rest.is_empty() {
      parts.push(SegmentPart::Literal(rest.to_string()));
    }

    Ok(Self { parts })
  }

  pub fn parts(&self) -> &[SegmentPart] {
    &self.parts
  }

  pub fn is_parameter(&self) -> bool {
    self.parts.iter().any(|part| matches!(part, SegmentPart::Param(_)))
  }

  /// The literal text of a segment without placeholders.
  pub fn literal(&self) -> Option<&str> {
    match self.parts.as_slice() {
      [SegmentPart::Literal(literal)] => Some(literal.as_str()),
      _ => None,
    }
  }

  pub fn params(&self) -> impl Iterator<Item = &str> {
    self.parts.iter().filter_map(|part| match part {
      SegmentPart::Param(name) => Some(name.as_str()),
      SegmentPart::Literal(_) => None,
    })
  }

  /// The segment with `{name}` rewritten as `<name>`.
  pub fn pattern(&self) -> String {
    self.parts.iter().fold(String::new(), |mut acc, part| {
      match part {
        SegmentPart::Literal(literal) => acc.push_str(literal),
        SegmentPart::Param(name) => {
          acc.push('<');
          acc.push_str(name);
          acc.push('>');
        }
      }
      acc
    })
  }
}

/// A validated path template such as `/users/{id}/posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
  segments: Vec<PathSegment>,
  pattern: String,
}

impl PathTemplate {
  pub fn parse(path: &str) -> Result<Self> {
    let Some(body) = path.strip_prefix('/') else {
      return Err(ModelgenError::malformed_path(path, PathTemplateError::MissingLeadingSlash));
    };

    let mut segments = vec![];
    let mut pattern = String::new();

    for raw in body.split('/') {
      pattern.push('/');
      if raw.is_empty() {
        continue;
      }
      let segment = PathSegment::parse(raw).map_err(|err| ModelgenError::malformed_path(path, err))?;
      pattern.push_str(&segment.pattern());
      segments.push(segment);
    }

    Ok(Self { segments, pattern })
  }

  pub fn segments(&self) -> &[PathSegment] {
    &self.segments
  }

  /// The template with placeholders written as `<name>`.
  pub fn pattern(&self) -> &str {
    &self.pattern
  }

  /// Placeholder names in order of appearance.
  pub fn params(&self) -> Vec<String> {
    self
      .segments
      .iter()
      .flat_map(PathSegment::params)
      .map(ToString::to_string)
      .collect()
  }
}
