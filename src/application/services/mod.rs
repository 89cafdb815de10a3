mod confidence;
mod extraction_service;
mod header_resolver;
mod response_parser;

pub use confidence::{annotate, DEFAULT_CONFIDENCE_THRESHOLD};
pub use extraction_service::{ExtractionError, ExtractionRequest, ExtractionService};
pub use header_resolver::{resolve, NoHeadersResolved};
pub use response_parser::{
    parse_table_response, MalformedResponse, ParsedTable, OMITTED_CONFIDENCE,
};
