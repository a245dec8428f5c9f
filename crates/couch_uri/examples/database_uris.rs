// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Building request URIs for an account and one of its databases.

use couch_uri::{AccountUri, DatabaseUri, QueryParams, UriError};
use serde_json::json;

fn main() -> Result<(), UriError> {
    let account = AccountUri::from_uri_str("https://db.example.com/api/couch/account_2128459498a75498")?;
    println!("all databases: {}", account.clone().all_dbs_uri()?);
    println!("uuids:         {}", account.clone().uuids_uri(5)?);

    let db = DatabaseUri::new(account.base_uri(), "animals")?;

    // The slash in a design document ID survives, other slashes do not
    println!("design doc:    {}", db.clone().document_uri("_design/views101", None)?);
    println!("plain doc:     {}", db.clone().document_uri("zoo/zebra", Some("2-a1b2"))?);

    let mut params = QueryParams::new();
    params.conflicts().revs_info();
    println!("with params:   {}", db.clone().document_uri_with_params("aardvark", params)?);

    let view = db
        .clone()
        .view("views101", "latin_name")?
        .query_json([("key", json!("Orycteropus afer")), ("limit", json!(10))])
        .build()?;
    println!("view:          {view}");

    // Non-string sequence tokens are quoted
    println!("changes:       {}", db.changes_uri([("since", json!(42)), ("limit", json!(100))])?);

    Ok(())
}
