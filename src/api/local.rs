use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::model::BulkMarks;

use super::{ApiError, ApiRequest, Method, Result, Transport};

/// In-process stand-in for the REST APIs, used when no base URL is configured.
///
/// Collections live in memory for the life of the process. Ids and timestamps
/// are assigned the way the real API does, and unknown ids answer 404.
#[derive(Default)]
pub struct LocalTransport {
    collections: RefCell<HashMap<String, Vec<Value>>>,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, collection: &str, body: &Value) -> Result<Value> {
        let Some(fields) = body.as_object() else {
            return Err(ApiError::from_status(400, "body must be an object"));
        };
        let now = now_rfc3339();
        let mut record = fields.clone();
        record.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        record.insert("createdAt".into(), Value::String(now.clone()));
        record.insert("updatedAt".into(), Value::String(now.clone()));
        if collection == "messages" {
            record.insert("sentAt".into(), Value::String(now));
            record.insert("read".into(), Value::Bool(false));
        }
        let record = Value::Object(record);
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn find(&self, collection: &str, id: &str) -> Result<Value> {
        self.collections
            .borrow()
            .get(collection)
            .and_then(|rows| rows.iter().find(|r| r["id"] == id))
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    fn merge(&self, collection: &str, id: &str, body: &Value) -> Result<Value> {
        let Some(patch) = body.as_object() else {
            return Err(ApiError::from_status(400, "body must be an object"));
        };
        let mut cols = self.collections.borrow_mut();
        let row = cols
            .get_mut(collection)
            .and_then(|rows| rows.iter_mut().find(|r| r["id"] == id))
            .ok_or(ApiError::NotFound)?;
        if let Some(obj) = row.as_object_mut() {
            for (k, v) in patch {
                if k != "id" {
                    obj.insert(k.clone(), v.clone());
                }
            }
            obj.insert("updatedAt".into(), Value::String(now_rfc3339()));
        }
        Ok(row.clone())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<Value> {
        let mut cols = self.collections.borrow_mut();
        let rows = cols.get_mut(collection).ok_or(ApiError::NotFound)?;
        let before = rows.len();
        rows.retain(|r| r["id"] != id);
        if rows.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(Value::Null)
    }

    fn bulk_marks(&self, body: &Value) -> Result<Value> {
        let bulk: BulkMarks = serde_json::from_value(body.clone())?;
        let mut created = Vec::with_capacity(bulk.entries.len());
        for draft in bulk.drafts() {
            created.push(self.insert("marks", &serde_json::to_value(&draft)?)?);
        }
        Ok(Value::Array(created))
    }

    fn login(&self, body: &Value) -> Result<Value> {
        let email = body
            .get("email")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ApiError::from_status(400, "missing email"))?;
        let name = email.split('@').next().unwrap_or(email);
        Ok(json!({
            "token": format!("local-{}", Uuid::new_v4()),
            "refreshToken": Uuid::new_v4().to_string(),
            "user": {
                "id": Uuid::new_v4().to_string(),
                "name": name,
                "email": email,
                "role": "admin",
            }
        }))
    }
}

impl Transport for LocalTransport {
    fn name(&self) -> &'static str {
        "local"
    }

    fn send(&self, req: &ApiRequest, _token: Option<&str>) -> Result<Value> {
        let empty = Value::Object(Map::new());
        let body = req.body.as_ref().unwrap_or(&empty);
        let segments: Vec<&str> = req.path.split('/').filter(|s| !s.is_empty()).collect();
        match (req.method, segments.as_slice()) {
            (Method::Post, ["auth", "login"]) => self.login(body),
            (Method::Post, ["marks", "bulk"]) => self.bulk_marks(body),
            (Method::Get, [collection]) => Ok(Value::Array(
                self.collections
                    .borrow()
                    .get(*collection)
                    .cloned()
                    .unwrap_or_default(),
            )),
            (Method::Post, [collection]) => self.insert(collection, body),
            (Method::Get, [collection, id]) => self.find(collection, id),
            (Method::Put, [collection, id]) => self.merge(collection, id, body),
            (Method::Delete, [collection, id]) => self.remove(collection, id),
            _ => Err(ApiError::from_status(
                405,
                format!("unsupported route {:?} {}", req.method, req.path),
            )),
        }
    }

    fn health(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Service;

    fn req(method: Method, path: &str, body: Option<Value>) -> ApiRequest {
        ApiRequest {
            method,
            service: Service::Classroom,
            path: path.into(),
            body,
        }
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let t = LocalTransport::new();
        let created = t
            .send(
                &req(Method::Post, "classes", Some(json!({ "name": "4C", "grade": "4" }))),
                None,
            )
            .expect("create");
        let id = created["id"].as_str().expect("id").to_string();
        assert!(created["createdAt"].is_string());

        let listed = t.send(&req(Method::Get, "classes", None), None).expect("list");
        assert_eq!(listed.as_array().map(|a| a.len()), Some(1));

        let updated = t
            .send(
                &req(Method::Put, &format!("classes/{id}"), Some(json!({ "grade": "5", "id": "x" }))),
                None,
            )
            .expect("update");
        assert_eq!(updated["grade"], "5");
        assert_eq!(updated["id"], id.as_str());
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let t = LocalTransport::new();
        let err = t
            .send(&req(Method::Put, "groups/nope", Some(json!({}))), None)
            .expect_err("missing");
        assert_eq!(err, ApiError::NotFound);
        let err = t
            .send(&req(Method::Delete, "groups/nope", None), None)
            .expect_err("missing");
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn bulk_marks_expand_into_records() {
        let t = LocalTransport::new();
        let out = t
            .send(
                &req(
                    Method::Post,
                    "marks/bulk",
                    Some(json!({
                        "groupId": "g1",
                        "title": "Oral",
                        "maxValue": 10,
                        "entries": [
                            { "studentId": "s1", "value": 7 },
                            { "studentId": "s2", "value": 9.5 }
                        ]
                    })),
                ),
                None,
            )
            .expect("bulk");
        let rows = out.as_array().expect("array");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["groupId"], "g1");
        assert_eq!(rows[1]["maxValue"], 10.0);
    }
}
