use http::Method;
use serde_json::json;

use crate::{
  document::OpenApiDocument,
  generator::{
    errors::ModelgenError,
    metrics::TransformStats,
    resolver::RefResolver,
    route::{KnownModelClasses, ResponseWrapper, Route, RouteInference},
  },
};

fn infer(value: serde_json::Value) -> (Vec<Route>, TransformStats) {
  let doc = OpenApiDocument::from_value(value).unwrap();
  let resolver = RefResolver::new(&doc);
  let mut known = KnownModelClasses::default();
  let mut stats = TransformStats::default();
  let routes = RouteInference::new(&resolver).infer(&mut known, &mut stats).unwrap();
  (routes, stats)
}

fn user_schemas() -> serde_json::Value {
  json!({
    "User": {"type": "object", "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}},
    "Post": {"type": "object", "properties": {"id": {"type": "integer"}}},
  })
}

fn find<'a>(routes: &'a [Route], method: Method, path: &str) -> &'a Route {
  routes
    .iter()
    .find(|r| r.method == method && r.path == path)
    .unwrap_or_else(|| panic!("no route for {method} {path}"))
}

#[test]
fn test_nested_sub_action_route() {
  let (routes, _) = infer(json!({
    "paths": {"/users/{id}/posts": {"get": {"responses": {"200": {"description": "ok"}}}}},
  }));

  let route = find(&routes, Method::GET, "/users/{id}/posts");
  assert_eq!(route.route, "user/view-posts");
  assert_eq!(route.pattern, "/users/<id>/posts");
  assert_eq!(route.path_params, ["id"]);
}

#[test]
fn test_create_with_direct_request_body() {
  let (routes, _) = infer(json!({
    "paths": {"/users": {"post": {
      "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}},
      "responses": {"201": {"description": "created"}},
    }}},
    "components": {"schemas": user_schemas()},
  }));

  let route = find(&routes, Method::POST, "/users");
  assert_eq!(route.route, "user/create");
  assert_eq!(route.model_class.as_deref(), Some("User"));
  assert_eq!(route.response_wrapper, None);
}

#[test]
fn test_action_names_by_verb() {
  let ok = json!({"responses": {"200": {"description": "ok"}}});
  let (routes, _) = infer(json!({
    "paths": {
      "/": {"get": ok},
      "/blog-posts": {"get": ok, "post": ok},
      "/blog-posts/{id}": {"get": ok, "put": ok, "patch": ok, "delete": ok, "options": ok},
      "/userProfiles/{id}/avatar/{size}/thumb": {"get": ok},
    },
  }));

  let actual: Vec<(String, &str)> = routes.iter().map(|r| (r.method.to_string(), r.route.as_str())).collect();
  assert_eq!(
    actual,
    vec![
      ("GET".to_string(), "default/index"),
      ("GET".to_string(), "blog-post/index"),
      ("POST".to_string(), "blog-post/create"),
      ("GET".to_string(), "blog-post/view"),
      ("PUT".to_string(), "blog-post/update"),
      ("DELETE".to_string(), "blog-post/delete"),
      ("OPTIONS".to_string(), "blog-post/http-options"),
      ("PATCH".to_string(), "blog-post/update"),
      ("GET".to_string(), "user-profile/view-avatar-thumb"),
    ]
  );
}

#[test]
fn test_index_discovers_listed_model_in_responses() {
  let (routes, _) = infer(json!({
    "paths": {"/users": {"get": {"responses": {"200": {"description": "ok", "content": {
      "application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/User"}}}
    }}}}}},
    "components": {"schemas": user_schemas()},
  }));

  let route = find(&routes, Method::GET, "/users");
  assert_eq!(route.model_class.as_deref(), Some("User"));
  assert_eq!(route.response_wrapper, None);
}

#[test]
fn test_view_ignores_request_body() {
  let (routes, _) = infer(json!({
    "paths": {"/search": {"get": {
      "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Post"}}}},
      "responses": {"200": {"description": "ok"}},
    }}},
    "components": {"schemas": user_schemas()},
  }));

  assert_eq!(find(&routes, Method::GET, "/search").model_class, None);
}

#[test]
fn test_wrapped_responses_record_keys() {
  let (routes, stats) = infer(json!({
    "paths": {
      "/users": {"get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {
        "type": "object",
        "properties": {
          "total": {"type": "integer"},
          "items": {"type": "array", "items": {"$ref": "#/components/schemas/User"}},
        }
      }}}}}}},
      "/users/{id}": {"get": {"responses": {"2XX": {"description": "ok", "content": {"application/json": {"schema": {
        "type": "object",
        "properties": {"data": {"$ref": "#/components/schemas/User"}}
      }}}}}}},
    },
    "components": {"schemas": user_schemas()},
  }));

  let index = find(&routes, Method::GET, "/users");
  assert_eq!(index.model_class.as_deref(), Some("User"));
  assert_eq!(index.response_wrapper, Some(ResponseWrapper::ItemsKey("items".to_string())));

  let view = find(&routes, Method::GET, "/users/{id}");
  assert_eq!(view.model_class.as_deref(), Some("User"));
  assert_eq!(view.response_wrapper, Some(ResponseWrapper::ItemKey("data".to_string())));

  assert_eq!(stats.routes_with_wrapper, 2);
}

#[test]
fn test_wrapper_must_hold_the_resolved_model() {
  let (routes, _) = infer(json!({
    "paths": {"/users": {"post": {
      "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}},
      "responses": {"201": {"description": "ok", "content": {"application/json": {"schema": {
        "type": "object",
        "properties": {
          "post": {"$ref": "#/components/schemas/Post"},
          "user": {"$ref": "#/components/schemas/User"},
        }
      }}}}},
    }}},
    "components": {"schemas": user_schemas()},
  }));

  let route = find(&routes, Method::POST, "/users");
  assert_eq!(route.model_class.as_deref(), Some("User"));
  assert_eq!(route.response_wrapper, Some(ResponseWrapper::ItemKey("user".to_string())));
}

#[test]
fn test_error_responses_are_ignored() {
  let (routes, _) = infer(json!({
    "paths": {"/users/{id}": {"get": {"responses": {
      "404": {"description": "missing", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}},
    }}}},
    "components": {"schemas": user_schemas()},
  }));

  assert_eq!(find(&routes, Method::GET, "/users/{id}").model_class, None);
}

#[test]
fn test_model_class_is_reused_across_methods_of_a_path() {
  let (routes, stats) = infer(json!({
    "paths": {"/users/{id}": {
      "get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}}}},
      "delete": {"responses": {"204": {"description": "gone"}}},
    }},
    "components": {"schemas": user_schemas()},
  }));

  let delete = find(&routes, Method::DELETE, "/users/{id}");
  assert_eq!(delete.route, "user/delete");
  assert_eq!(delete.model_class.as_deref(), Some("User"));
  assert_eq!(stats.model_classes_reused, 1);
}

#[test]
fn test_known_model_classes_do_not_leak_across_paths() {
  let (routes, stats) = infer(json!({
    "paths": {
      "/users": {"get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}}}}},
      "/health": {"get": {"responses": {"200": {"description": "ok"}}}},
    },
    "components": {"schemas": user_schemas()},
  }));

  assert_eq!(find(&routes, Method::GET, "/health").model_class, None);
  assert_eq!(stats.routes_with_model, 1);
  assert_eq!(stats.warnings.len(), 1);
}

#[test]
fn test_response_components_are_resolved() {
  let (routes, _) = infer(json!({
    "paths": {"/users/{id}": {"put": {
      "requestBody": {"$ref": "#/components/requestBodies/UserBody"},
      "responses": {"200": {"$ref": "#/components/responses/UserEnvelope"}},
    }}},
    "components": {
      "schemas": user_schemas(),
      "requestBodies": {"UserBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/User"}}}}},
      "responses": {"UserEnvelope": {"description": "ok", "content": {"application/json": {"schema": {
        "type": "object", "properties": {"result": {"$ref": "#/components/schemas/User"}}
      }}}}},
    },
  }));

  let route = find(&routes, Method::PUT, "/users/{id}");
  assert_eq!(route.model_class.as_deref(), Some("User"));
  assert_eq!(route.response_wrapper, Some(ResponseWrapper::ItemKey("result".to_string())));
}

#[test]
fn test_aliased_schemas_name_the_aliased_model() {
  let mut schemas = user_schemas();
  schemas["Member"] = json!({"$ref": "#/components/schemas/User"});
  let (routes, _) = infer(json!({
    "paths": {
      "/members/{id}": {"get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {
        "$ref": "#/components/schemas/Member"
      }}}}}}},
      "/members": {"post": {
        "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Member"}}}},
        "responses": {"201": {"description": "ok", "content": {"application/json": {"schema": {
          "type": "object", "properties": {"member": {"$ref": "#/components/schemas/Member"}}
        }}}}},
      }},
    },
    "components": {"schemas": schemas},
  }));

  let view = find(&routes, Method::GET, "/members/{id}");
  assert_eq!(view.route, "member/view");
  assert_eq!(view.model_class.as_deref(), Some("User"));

  let create = find(&routes, Method::POST, "/members");
  assert_eq!(create.model_class.as_deref(), Some("User"));
  assert_eq!(create.response_wrapper, Some(ResponseWrapper::ItemKey("member".to_string())));
}

#[test]
fn test_operation_metadata_and_route_override() {
  let (routes, _) = infer(json!({
    "paths": {"/session": {"post": {
      "operationId": "login",
      "summary": "Start a session",
      "x-route": "auth/login",
      "responses": {"200": {"description": "ok"}},
    }}},
  }));

  let route = find(&routes, Method::POST, "/session");
  assert_eq!(route.route, "auth/login");
  assert_eq!(route.operation_id.as_deref(), Some("login"));
  assert_eq!(route.summary.as_deref(), Some("Start a session"));
}

#[test]
fn test_malformed_path_aborts_inference() {
  let doc = OpenApiDocument::from_value(json!({
    "paths": {"users": {"get": {"responses": {}}}},
  }))
  .unwrap();
  let resolver = RefResolver::new(&doc);

  let err = RouteInference::new(&resolver)
    .infer(&mut KnownModelClasses::default(), &mut TransformStats::default())
    .unwrap_err();
  assert!(matches!(err, ModelgenError::MalformedPath { ref path, .. } if path == "users"));
}

#[test]
fn test_route_serializes_for_emission() {
  let (routes, _) = infer(json!({
    "paths": {"/users/{id}": {"get": {"responses": {"200": {"description": "ok", "content": {"application/json": {"schema": {
      "type": "object", "properties": {"data": {"$ref": "#/components/schemas/User"}}
    }}}}}}}},
    "components": {"schemas": user_schemas()},
  }));

  let value = serde_json::to_value(&routes[0]).unwrap();
  assert_eq!(
    value,
    json!({
      "path": "/users/{id}",
      "method": "GET",
      "pattern": "/users/<id>",
      "route": "user/view",
      "pathParams": ["id"],
      "modelClass": "User",
      "responseWrapper": {"itemKey": "data"},
    })
  );
}

#[test]
fn test_path_params_come_from_the_template() {
  let (routes, _) = infer(json!({
    "paths": {"/users/{userId}/posts/{slug}": {
      "parameters": [{"name": "userId", "in": "path", "required": true, "schema": {"type": "integer"}}],
      "get": {
        "parameters": [
          {"name": "page", "in": "query", "schema": {"type": "integer"}},
          {"$ref": "#/components/parameters/Slug"},
        ],
        "responses": {"200": {"description": "ok"}},
      },
    }},
    "components": {"parameters": {"Slug": {"name": "slug", "in": "path", "required": true}}},
  }));

  let route = find(&routes, Method::GET, "/users/{userId}/posts/{slug}");
  assert_eq!(route.path_params, ["userId", "slug"]);
  assert_eq!(route.pattern, "/users/<userId>/posts/<slug>");
}
