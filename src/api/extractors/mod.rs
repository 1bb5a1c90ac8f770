pub mod resource_id;
pub mod validated_json;
