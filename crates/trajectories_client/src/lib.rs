pub mod city;
pub mod coordinates;
pub mod map_view;
pub mod polyline;
pub mod trajectories_response;
pub mod trajectory_client;
pub mod trajectory_client_params;
pub mod trajectory_error;
pub mod trajectory_query;
pub mod trajectory_result;
