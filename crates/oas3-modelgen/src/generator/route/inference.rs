use http::Method;
use indexmap::IndexMap;
use tracing::debug;

use super::{KnownModelClasses, ResponseWrapper, Route, path::PathTemplate};
use crate::{
  document::{MediaType, Operation, PathItem, RefOr, Response, Schema},
  generator::{errors::Result, metrics::TransformStats, naming, resolver::RefResolver},
  utils::SchemaExt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum BaseAction {
  Index,
  View,
  Create,
  Update,
  Delete,
  Http(String),
}

impl BaseAction {
  fn for_method(method: &Method, has_params: bool) -> Self {
    match *method {
      Method::GET if has_params => Self::View,
      Method::GET => Self::Index,
      Method::POST => Self::Create,
      Method::PUT | Method::PATCH => Self::Update,
      Method::DELETE => Self::Delete,
      _ => Self::Http(method.as_str().to_ascii_lowercase()),
    }
  }

  /// Write actions look at the request body before the responses.
  fn reads_request_body(&self) -> bool {
    matches!(self, Self::Create | Self::Update | Self::Delete)
  }

  fn name(&self) -> String {
    match self {
      Self::Index => "index".to_string(),
      Self::View => "view".to_string(),
      Self::Create => "create".to_string(),
      Self::Update => "update".to_string(),
      Self::Delete => "delete".to_string(),
      Self::Http(verb) => format!("http-{verb}"),
    }
  }
}

/// A model found in a payload, and whether the payload is a list of it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PayloadModel {
  name: String,
  many: bool,
}

/// Derives one [`Route`] per (path, method) pair of the document.
#[derive(Debug, Clone, Copy)]
pub struct RouteInference<'r, 'a> {
  resolver: &'r RefResolver<'a>,
}

impl<'r, 'a> RouteInference<'r, 'a> {
  pub fn new(resolver: &'r RefResolver<'a>) -> Self {
    Self { resolver }
  }

  /// Infers routes for every path in declaration order.
  pub fn infer(&self, known: &mut KnownModelClasses, stats: &mut TransformStats) -> Result<Vec<Route>> {
    let mut routes = vec![];
    for (path, item) in &self.resolver.document().paths {
      routes.extend(self.infer_path(path, item, known, stats)?);
    }
    Ok(routes)
  }

  /// Infers the routes of a single path item.
  ///
  /// When an operation yields no model class, the last one recorded in
  /// `known` for the same path is reused.
  pub fn infer_path(
    &self,
    path: &str,
    item: &'a PathItem,
    known: &mut KnownModelClasses,
    stats: &mut TransformStats,
  ) -> Result<Vec<Route>> {
    let template = PathTemplate::parse(path)?;
    let path_params = template.params();

    let mut controller_segments = vec![];
    let mut sub_actions = vec![];
    let mut seen_param = false;
    for segment in template.segments() {
      if segment.is_parameter() {
        seen_param = true;
      } else if let Some(literal) = segment.literal() {
        let part = naming::route_segment(literal);
        if seen_param {
          sub_actions.push(part);
        } else {
          controller_segments.push(part);
        }
      }
    }
    let controller = naming::controller_id(&controller_segments);

    let mut routes = vec![];
    for (method, operation) in item.operations() {
      let action = BaseAction::for_method(&method, !path_params.is_empty());
      let action_id = std::iter::once(action.name())
        .chain(sub_actions.iter().cloned())
        .collect::<Vec<_>>()
        .join("-");

      let model_class = match self.discover_model(&action, operation)? {
        Some(model) => {
          known.record(path, &model);
          Some(model)
        }
        None => known.get(path).map(|previous| {
          stats.record_model_class_reuse();
          previous.to_string()
        }),
      };

      let response_wrapper = match model_class.as_deref() {
        Some(model) => self.detect_wrapper(operation, model)?,
        None => None,
      };

      let route = Route {
        path: path.to_string(),
        method,
        pattern: template.pattern().to_string(),
        route: operation
          .x_route
          .clone()
          .unwrap_or_else(|| format!("{controller}/{action_id}")),
        path_params: path_params.clone(),
        model_class,
        response_wrapper,
        operation_id: operation.operation_id.clone(),
        summary: operation.summary.clone(),
      };

      debug!(
        method = %route.method,
        path = %route.path,
        route = %route.route,
        model = route.model_class.as_deref().unwrap_or("-"),
        "inferred route"
      );
      stats.record_route(&route);
      routes.push(route);
    }

    Ok(routes)
  }

  fn discover_model(&self, action: &BaseAction, operation: &'a Operation) -> Result<Option<String>> {
    if action.reads_request_body()
      && let Some(body) = &operation.request_body
    {
      let body = self.resolver.resolve_request_body(body)?;
      if let Some(model) = self.model_in_content(&body.content)? {
        return Ok(Some(model));
      }
    }

    for response in self.success_responses(operation)? {
      if let Some(model) = self.model_in_content(&response.content)? {
        return Ok(Some(model));
      }
    }

    Ok(None)
  }

  /// Finds the key under which `model` is wrapped in a success response.
  fn detect_wrapper(&self, operation: &'a Operation, model: &str) -> Result<Option<ResponseWrapper>> {
    for response in self.success_responses(operation)? {
      for node in payload_schemas(&response.content) {
        if self.payload_model(node)?.is_some() {
          continue;
        }
        let schema = self.resolver.resolve_schema(node)?;
        if let Some((_, wrapper)) = self.wrapped_model(schema, Some(model))? {
          return Ok(Some(wrapper));
        }
      }
    }
    Ok(None)
  }

  fn success_responses(&self, operation: &'a Operation) -> Result<Vec<&'a Response>> {
    operation
      .responses
      .iter()
      .filter(|(status, _)| is_success_status(status))
      .map(|(_, response)| self.resolver.resolve_response(response))
      .collect()
  }

  /// First model found across all media types, direct, listed or wrapped.
  fn model_in_content(&self, content: &'a IndexMap<String, MediaType>) -> Result<Option<String>> {
    for node in payload_schemas(content) {
      if let Some(found) = self.payload_model(node)? {
        return Ok(Some(found.name));
      }
      let schema = self.resolver.resolve_schema(node)?;
      if let Some((found, _)) = self.wrapped_model(schema, None)? {
        return Ok(Some(found));
      }
    }
    Ok(None)
  }

  /// A direct model reference, or an array whose items are one.
  fn payload_model(&self, node: &'a RefOr<Schema>) -> Result<Option<PayloadModel>> {
    if let Some(name) = self.resolver.model_ref_name(node)? {
      return Ok(Some(PayloadModel { name, many: false }));
    }

    let schema = self.resolver.resolve_schema(node)?;
    if schema.is_array()
      && let Some(items) = schema.items.as_deref()
      && let Some(name) = self.resolver.model_ref_name(items)?
    {
      return Ok(Some(PayloadModel { name, many: true }));
    }

    Ok(None)
  }

  /// An object payload whose property holds a model or a list of models.
  ///
  /// With `wanted`, only properties holding that model match.
  fn wrapped_model(&self, schema: &'a Schema, wanted: Option<&str>) -> Result<Option<(String, ResponseWrapper)>> {
    if !schema.is_object() {
      return Ok(None);
    }

    for (key, property) in &schema.properties {
      if let Some(found) = self.payload_model(property)?
        && wanted.is_none_or(|model| model == found.name)
      {
        let wrapper = if found.many {
          ResponseWrapper::ItemsKey(key.clone())
        } else {
          ResponseWrapper::ItemKey(key.clone())
        };
        return Ok(Some((found.name, wrapper)));
      }
    }

    Ok(None)
  }
}

fn payload_schemas(content: &IndexMap<String, MediaType>) -> impl Iterator<Item = &RefOr<Schema>> {
  content.values().filter_map(|media| media.schema.as_ref())
}

/// `200`-`299`, or the `2XX` range key.
pub(crate) fn is_success_status(status: &str) -> bool {
  if status.eq_ignore_ascii_case("2xx") {
    return true;
  }
  status.parse::<u16>().is_ok_and(|code| (200..300).contains(&code))
}
