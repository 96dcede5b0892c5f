pub use hl7_toolchain_schemas::{
    SEGMENT_TYPE_KEY, SchemaError, SchemaSet, SegmentSchema, is_segment_code,
};
