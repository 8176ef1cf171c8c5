// AI settings screen: inspect, store and remove the completion key.

pub mod handlers;
