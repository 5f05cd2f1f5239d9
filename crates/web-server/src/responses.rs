use chrono::{DateTime, Utc};
use database::{ClassNoticeRecord, ClassRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The typed success envelope every endpoint responds with.
#[derive(Debug, Serialize)]
pub struct BaseResponse<T> {
    pub result: T,
}

impl<T> BaseResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// The typed error envelope: a stable machine-readable code plus a message
/// safe to show a client. Internal detail stays in the server logs.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Request body for creating a class.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReq {
    pub class_name: String,
    pub teacher_id: String,
}

/// Request body for creating or updating a class notice.
#[derive(Debug, Deserialize)]
pub struct ClassNoticeReq {
    pub message: String,
}

/// Wire shape of a class.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResp {
    pub class_id: Uuid,
    pub class_name: String,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<ClassRecord> for ClassResp {
    fn from(record: ClassRecord) -> Self {
        Self {
            class_id: record.class_id,
            class_name: record.class_name,
            teacher_id: record.teacher_id,
            created_at: record.created_at,
        }
    }
}

/// Wire shape of a class notice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNoticeResp {
    pub id: i64,
    pub class_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClassNoticeRecord> for ClassNoticeResp {
    fn from(record: ClassNoticeRecord) -> Self {
        Self {
            id: record.notice_id,
            class_id: record.class_id,
            message: record.message,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn class_response_uses_the_camel_case_wire_shape() {
        let record = ClassRecord {
            class_id: Uuid::nil(),
            class_name: "Algebra I".to_string(),
            teacher_id: "teacher-42".to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        let body = serde_json::to_value(BaseResponse::new(ClassResp::from(record))).unwrap();

        assert_eq!(
            body["result"]["className"],
            json!("Algebra I"),
            "field names must be camelCase on the wire"
        );
        assert_eq!(body["result"]["teacherId"], json!("teacher-42"));
        assert!(body["result"]["classId"].is_string());
    }

    #[test]
    fn create_class_request_parses_camel_case() {
        let req: ClassReq = serde_json::from_value(json!({
            "className": "History",
            "teacherId": "teacher-7",
        }))
        .unwrap();
        assert_eq!(req.class_name, "History");
        assert_eq!(req.teacher_id, "teacher-7");
    }
}
