mod grpc_user_server;
mod handlers;

pub use grpc_user_server::UserGrpcService;
