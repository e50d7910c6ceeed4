//! OpenAPI Document Generator Binary
//!
//! Prints the Folio API OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p folio-api --bin generate-openapi --features openapi > openapi.json

use folio_api::ApiDoc;

fn main() {
    match ApiDoc::to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI document: {}", e);
            std::process::exit(1);
        }
    }
}
