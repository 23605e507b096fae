//! `$ref` resolution scoped to a single transformation run.
//!
//! Resolution is memoized per pointer and follows reference chains
//! (`A -> B -> schema`). Pointers currently being expanded are tracked in an
//! in-progress set; re-entering one of them is reported as
//! [`ModelgenError::CycleDetected`] instead of recursing without bound.

use std::{cell::RefCell, collections::HashMap};

use indexmap::{IndexMap, IndexSet};

use crate::{
  document::{Components, OpenApiDocument, RefOr, RequestBody, Response, Schema},
  generator::errors::{ModelgenError, Result},
  utils::{JsonPointer, SchemaExt, parse_schema_ref_path},
};

#[derive(Debug)]
pub struct RefResolver<'a> {
  document: &'a OpenApiDocument,
  cache: RefCell<HashMap<String, &'a Schema>>,
  terminals: RefCell<HashMap<String, String>>,
  in_progress: RefCell<IndexSet<String>>,
}

impl<'a> RefResolver<'a> {
  pub fn new(document: &'a OpenApiDocument) -> Self {
    Self {
      document,
      cache: RefCell::new(HashMap::new()),
      terminals: RefCell::new(HashMap::new()),
      in_progress: RefCell::new(IndexSet::new()),
    }
  }

  pub fn document(&self) -> &'a OpenApiDocument {
    self.document
  }

  /// Resolves a schema pointer to its concrete schema, following chained references.
  pub fn resolve(&self, pointer: &str) -> Result<&'a Schema> {
    let cached = self.cache.borrow().get(pointer).copied();
    if let Some(schema) = cached {
      return Ok(schema);
    }

    let mut chain: Vec<String> = vec![];
    let mut current = pointer.to_string();

    let schema = loop {
      if chain.contains(&current) || self.in_progress.borrow().contains(&current) {
        return Err(self.cycle_error(&current, &chain));
      }
      chain.push(current.clone());

      match self.lookup(&current)? {
        RefOr::Ref { ref_path } => current.clone_from(ref_path),
        RefOr::Item(schema) => break schema,
      }
    };

    let mut cache = self.cache.borrow_mut();
    let mut terminals = self.terminals.borrow_mut();
    for visited in &chain {
      cache.insert(visited.clone(), schema);
      terminals.insert(visited.clone(), current.clone());
    }

    Ok(schema)
  }

  /// Returns the inline schema, or resolves the reference.
  pub fn resolve_schema(&self, node: &'a RefOr<Schema>) -> Result<&'a Schema> {
    match node {
      RefOr::Item(schema) => Ok(schema),
      RefOr::Ref { ref_path } => self.resolve(ref_path),
    }
  }

  /// Resolves `pointer` and runs `expand` with the pointer marked in progress.
  ///
  /// Any attempt to resolve or expand the same pointer from within `expand`
  /// fails with [`ModelgenError::CycleDetected`].
  pub fn expand<T>(&self, pointer: &str, expand: impl FnOnce(&'a Schema) -> Result<T>) -> Result<T> {
    if self.in_progress.borrow().contains(pointer) {
      return Err(self.cycle_error(pointer, &[]));
    }

    let schema = self.resolve(pointer)?;
    self.in_progress.borrow_mut().insert(pointer.to_string());
    let result = expand(schema);
    self.in_progress.borrow_mut().shift_remove(pointer);
    result
  }

  /// Returns the target model name when `node` is a reference to a top-level
  /// object schema (`#/components/schemas/NAME`).
  ///
  /// Aliases are followed, so `Member -> User` names `User`. Other pointer
  /// shapes, and chains ending at a non-object or nested schema, are inline
  /// values and yield `None`.
  pub fn model_ref_name(&self, node: &RefOr<Schema>) -> Result<Option<String>> {
    let Some(ref_path) = node.as_ref_path() else {
      return Ok(None);
    };
    let Some(name) = parse_schema_ref_path(ref_path) else {
      return Ok(None);
    };
    if !self.document.has_schema(&name) {
      return Err(ModelgenError::DanglingReference {
        pointer: ref_path.to_string(),
      });
    }

    let target = self.resolve(ref_path)?;
    if !target.is_object() {
      return Ok(None);
    }
    Ok(self.terminal_pointer(ref_path).as_deref().and_then(parse_schema_ref_path))
  }

  /// The pointer whose node is the concrete schema at the end of `pointer`'s chain.
  ///
  /// Only known once `pointer` has been resolved.
  fn terminal_pointer(&self, pointer: &str) -> Option<String> {
    self.terminals.borrow().get(pointer).cloned()
  }

  pub fn resolve_request_body(&self, node: &'a RefOr<RequestBody>) -> Result<&'a RequestBody> {
    self.resolve_component(node, "requestBodies", |c| &c.request_bodies)
  }

  pub fn resolve_response(&self, node: &'a RefOr<Response>) -> Result<&'a Response> {
    self.resolve_component(node, "responses", |c| &c.responses)
  }

  fn resolve_component<T>(
    &self,
    node: &'a RefOr<T>,
    kind: &str,
    select: impl Fn(&'a Components) -> &'a IndexMap<String, RefOr<T>>,
  ) -> Result<&'a T> {
    let mut chain: Vec<&str> = vec![];
    let mut current = node;

    loop {
      let ref_path = match current {
        RefOr::Item(item) => return Ok(item),
        RefOr::Ref { ref_path } => ref_path.as_str(),
      };

      if chain.contains(&ref_path) {
        let chain = chain.iter().map(ToString::to_string).collect();
        return Err(ModelgenError::CycleDetected {
          pointer: ref_path.to_string(),
          chain,
        });
      }
      chain.push(ref_path);

      let dangling = || ModelgenError::DanglingReference {
        pointer: ref_path.to_string(),
      };
      let pointer = JsonPointer::parse(ref_path).ok_or_else(dangling)?;
      current = match pointer.component() {
        Some((found_kind, name, [])) if found_kind == kind => self
          .document
          .components
          .as_ref()
          .and_then(|components| select(components).get(name))
          .ok_or_else(dangling)?,
        _ => return Err(dangling()),
      };
    }
  }

  /// Finds the node a schema pointer designates, without following the final reference.
  ///
  /// Supports `#/components/schemas/NAME` optionally followed by
  /// `properties/<prop>` and `items` steps.
  fn lookup(&self, pointer: &str) -> Result<&'a RefOr<Schema>> {
    let dangling = || ModelgenError::DanglingReference {
      pointer: pointer.to_string(),
    };

    let parsed = JsonPointer::parse(pointer).ok_or_else(dangling)?;
    let Some(("schemas", name, rest)) = parsed.component() else {
      return Err(dangling());
    };

    let mut node = self.document.schema(name).ok_or_else(dangling)?;
    let mut steps = rest.iter();

    while let Some(step) = steps.next() {
      let schema = self.resolve_schema(node)?;
      node = match step.as_str() {
        "properties" => {
          let property = steps.next().ok_or_else(dangling)?;
          schema.properties.get(property).ok_or_else(dangling)?
        }
        "items" => schema.items.as_deref().ok_or_else(dangling)?,
        _ => return Err(dangling()),
      };
    }

    Ok(node)
  }

  fn cycle_error(&self, pointer: &str, chain: &[String]) -> ModelgenError {
    let mut full_chain: Vec<String> = self.in_progress.borrow().iter().cloned().collect();
    full_chain.extend(chain.iter().cloned());
    full_chain.push(pointer.to_string());

    ModelgenError::CycleDetected {
      pointer: pointer.to_string(),
      chain: full_chain,
    }
  }
}
