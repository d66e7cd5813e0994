use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::get_user;
use crate::domain::user::ports::UserServicePort;
use crate::proto::user_service_server::UserService as UserServiceProto;
use crate::proto::GetUserRequest;
use crate::proto::GetUserResponse;

pub struct UserGrpcService {
    service: Arc<dyn UserServicePort>,
}

impl UserGrpcService {
    pub fn new(service: Arc<dyn UserServicePort>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let response = get_user::get_user(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
