use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

pub async fn get_message() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend!".to_string(),
    })
}
