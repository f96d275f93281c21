pub mod http_prediction_client;
pub mod predict_worker;
