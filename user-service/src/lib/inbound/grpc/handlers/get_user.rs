use tonic::Status;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::get_user_response::Result as GetUserResult;
use crate::proto::GetUserRequest;
use crate::proto::GetUserResponse;
use crate::proto::User as ProtoUser;

/// Look up a user for internal callers.
///
/// A malformed id is an `InvalidArgument` status; domain failures travel in the
/// response's `error` field.
pub async fn get_user(
    service: &dyn UserServicePort,
    request: GetUserRequest,
) -> Result<GetUserResponse, Status> {
    let user_id = UserId::from_string(&request.user_id)
        .map_err(|e| Status::invalid_argument(format!("Invalid user ID: {}", e)))?;

    match service.get_user(&user_id).await {
        Ok(user) => {
            let proto_user: ProtoUser = user.into();
            Ok(GetUserResponse {
                result: Some(GetUserResult::User(proto_user)),
            })
        }
        Err(e) => {
            tracing::debug!(user_id = %user_id, error = %e, "gRPC user lookup failed");
            Ok(GetUserResponse {
                result: Some(GetUserResult::Error(e.to_string())),
            })
        }
    }
}
