//! Canonical JSON wire codec.
//!
//! Output is always compact (no whitespace) with a fixed key order; the order
//! is pinned by wire-struct declaration order. Masked omission drops a field
//! entirely from the output, never emitting `null` or zero. Deserialization
//! walks the JSON tree so every failure maps to a precise error kind:
//! [`Error::MalformedJson`], [`Error::MissingField`] or
//! [`Error::InvalidEncoding`].

use serde::Serialize;
use serde_json::Value;

use tangle_types::{
    Error, FetchTxnWithUuidResponse, FieldMask, FindTransactionObjectsRequest,
    FindTransactionObjectsResponse, FindTransactionsResponse, GenerateAddressResponse,
    GetTipsResponse, RequestStatus, Result, SendTransferRequest, SendTransferResponse,
    TernaryBuffer, Transaction, HASH_TRITS,
};

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::SerializationError(e.to_string()))
}

// =============================================================================
// Transaction object
// =============================================================================

/// Wire form of a full transaction object.
///
/// Field declaration order is the canonical key order; absent (masked-out)
/// fields are omitted entirely.
#[derive(Serialize, Default)]
struct TransactionWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature_and_message_fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    obsolete_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trunk_transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch_transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_timestamp_lower_bound: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_timestamp_upper_bound: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nonce: Option<String>,
}

fn transaction_wire(txn: &Transaction, mask: FieldMask) -> TransactionWire {
    // Record setters enforce role lengths, so buffers here are always
    // well-formed; the mask alone decides what reaches the wire.
    let mut wire = TransactionWire::default();
    if mask.contains(FieldMask::CONSENSUS) {
        wire.hash = Some(txn.hash().to_trytes());
    }
    if mask.contains(FieldMask::DATA) {
        wire.signature_and_message_fragment =
            Some(txn.signature_and_message_fragment().to_trytes());
    }
    if mask.contains(FieldMask::ESSENCE) {
        wire.address = Some(txn.address().to_trytes());
        wire.value = Some(txn.value());
        wire.obsolete_tag = Some(txn.obsolete_tag().to_trytes());
        wire.timestamp = Some(txn.timestamp());
        wire.current_index = Some(txn.current_index());
        wire.last_index = Some(txn.last_index());
        wire.bundle_hash = Some(txn.bundle_hash().to_trytes());
    }
    if mask.contains(FieldMask::ATTACHMENT) {
        wire.trunk_transaction_hash = Some(txn.trunk().to_trytes());
        wire.branch_transaction_hash = Some(txn.branch().to_trytes());
        wire.tag = Some(txn.tag().to_trytes());
        wire.attachment_timestamp = Some(txn.attachment_timestamp());
        wire.attachment_timestamp_lower_bound = Some(txn.attachment_timestamp_lower());
        wire.attachment_timestamp_upper_bound = Some(txn.attachment_timestamp_upper());
        wire.nonce = Some(txn.nonce().to_trytes());
    }
    wire
}

/// Serialize a transaction record restricted to the groups set in `mask`.
///
/// The explicit mask wins: serialization never infers presence from field
/// values, and a record's own mask is only a default the caller may narrow.
pub fn serialize_transaction(txn: &Transaction, mask: FieldMask) -> Result<String> {
    to_json(&transaction_wire(txn, mask))
}

/// Serialize an insertion-ordered list of full transaction objects as a bare
/// JSON array.
pub fn serialize_transaction_list(res: &FindTransactionObjectsResponse) -> Result<String> {
    let wires: Vec<TransactionWire> = res
        .iter()
        .map(|txn| transaction_wire(txn, FieldMask::ALL))
        .collect();
    to_json(&wires)
}

fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::MalformedJson(e.to_string()))
}

fn field<'a>(obj: &'a Value, key: &'static str) -> Result<&'a Value> {
    obj.get(key).ok_or(Error::MissingField(key))
}

fn field_str<'a>(obj: &'a Value, key: &'static str) -> Result<&'a str> {
    field(obj, key)?
        .as_str()
        .ok_or_else(|| Error::MalformedJson(format!("`{key}` is not a string")))
}

fn field_i64(obj: &Value, key: &'static str) -> Result<i64> {
    field(obj, key)?
        .as_i64()
        .ok_or_else(|| Error::MalformedJson(format!("`{key}` is not an integer")))
}

fn field_u64(obj: &Value, key: &'static str) -> Result<u64> {
    field(obj, key)?
        .as_u64()
        .ok_or_else(|| Error::MalformedJson(format!("`{key}` is not an unsigned integer")))
}

/// Decode a full 16-key transaction object into a fully masked record.
pub fn deserialize_transaction(text: &str) -> Result<Transaction> {
    let json = parse(text)?;
    let mut txn = Transaction::new();

    txn.set_hash(TernaryBuffer::from_trytes_exact(
        field_str(&json, "hash")?,
        HASH_TRITS,
    )?)?;
    txn.set_signature_and_message_fragment(TernaryBuffer::from_trytes(field_str(
        &json,
        "signature_and_message_fragment",
    )?)?)?;
    txn.set_address(TernaryBuffer::from_trytes_exact(
        field_str(&json, "address")?,
        HASH_TRITS,
    )?)?;
    txn.set_value(field_i64(&json, "value")?);
    txn.set_obsolete_tag(TernaryBuffer::from_trytes(field_str(&json, "obsolete_tag")?)?)?;
    txn.set_timestamp(field_u64(&json, "timestamp")?);
    txn.set_current_index(field_u64(&json, "current_index")?);
    txn.set_last_index(field_u64(&json, "last_index")?);
    txn.set_bundle_hash(TernaryBuffer::from_trytes_exact(
        field_str(&json, "bundle_hash")?,
        HASH_TRITS,
    )?)?;
    txn.set_trunk(TernaryBuffer::from_trytes_exact(
        field_str(&json, "trunk_transaction_hash")?,
        HASH_TRITS,
    )?)?;
    txn.set_branch(TernaryBuffer::from_trytes_exact(
        field_str(&json, "branch_transaction_hash")?,
        HASH_TRITS,
    )?)?;
    txn.set_tag(TernaryBuffer::from_trytes(field_str(&json, "tag")?)?)?;
    txn.set_attachment_timestamp(field_i64(&json, "attachment_timestamp")?);
    txn.set_attachment_timestamp_lower(field_i64(&json, "attachment_timestamp_lower_bound")?);
    txn.set_attachment_timestamp_upper(field_i64(&json, "attachment_timestamp_upper_bound")?);
    txn.set_nonce(TernaryBuffer::from_trytes(field_str(&json, "nonce")?)?)?;

    Ok(txn)
}

// =============================================================================
// List responses
// =============================================================================

#[derive(Serialize)]
struct TipsWire {
    tips: Vec<String>,
}

/// `{"tips":[...]}` in pop (LIFO) order: last push first.
pub fn serialize_get_tips(res: &GetTipsResponse) -> Result<String> {
    to_json(&TipsWire {
        tips: res.iter_lifo().map(|t| t.to_trytes()).collect(),
    })
}

#[derive(Serialize)]
struct AddressWire {
    address: Vec<String>,
}

/// `{"address":[...]}` in arrival (FIFO) order.
pub fn serialize_generate_address(res: &GenerateAddressResponse) -> Result<String> {
    to_json(&AddressWire {
        address: res.iter().map(|a| a.to_trytes()).collect(),
    })
}

#[derive(Serialize)]
struct HashesWire {
    hashes: Vec<String>,
}

/// `{"hashes":[...]}` in arrival (FIFO) order.
pub fn serialize_find_transactions(res: &FindTransactionsResponse) -> Result<String> {
    to_json(&HashesWire {
        hashes: res.iter().map(|h| h.to_trytes()).collect(),
    })
}

/// Decode `{"hashes":[...]}` into a FIFO lookup request.
pub fn deserialize_find_transaction_objects(text: &str) -> Result<FindTransactionObjectsRequest> {
    let json = parse(text)?;
    let hashes = field(&json, "hashes")?
        .as_array()
        .ok_or_else(|| Error::MalformedJson("`hashes` is not an array".to_string()))?;

    let mut req = FindTransactionObjectsRequest::new();
    for item in hashes {
        let trytes = item
            .as_str()
            .ok_or_else(|| Error::MalformedJson("hash entry is not a string".to_string()))?;
        req.push(TernaryBuffer::from_trytes_exact(trytes, HASH_TRITS)?)?;
    }
    Ok(req)
}

// =============================================================================
// Send transfer
// =============================================================================

/// Decode a send-transfer request. `value`, `message`, `tag` and `address`
/// are all mandatory; `message` and `tag` keep the caller's tryte length.
pub fn deserialize_send_transfer(text: &str) -> Result<SendTransferRequest> {
    let json = parse(text)?;
    Ok(SendTransferRequest {
        value: field_i64(&json, "value")?,
        message: TernaryBuffer::from_trytes(field_str(&json, "message")?)?,
        tag: TernaryBuffer::from_trytes(field_str(&json, "tag")?)?,
        address: TernaryBuffer::from_trytes_exact(field_str(&json, "address")?, HASH_TRITS)?,
    })
}

#[derive(Serialize)]
struct SendTransferWire {
    hash: String,
}

/// `{"hash":"<81-tryte>"}`.
pub fn serialize_send_transfer(res: &SendTransferResponse) -> Result<String> {
    to_json(&SendTransferWire {
        hash: res.hash().to_trytes(),
    })
}

// =============================================================================
// Buffered-request lookup
// =============================================================================

#[derive(Serialize)]
struct FetchTxnWithUuidWire {
    status: RequestStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bundle: Vec<TransactionWire>,
}

/// Status token from the closed set `{UNSENT, NOT_EXIST, SENT}`, plus the
/// buffered bundle as full transaction objects when present.
pub fn serialize_fetch_txn_with_uuid(res: &FetchTxnWithUuidResponse) -> Result<String> {
    to_json(&FetchTxnWithUuidWire {
        status: res.status,
        bundle: res
            .bundle()
            .map(|txn| transaction_wire(txn, FieldMask::ALL))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_types::{NONCE_TRITS, SIGNATURE_TRITS, TAG_TRITS};

    fn trytes(fill: char, len: usize) -> String {
        fill.to_string().repeat(len)
    }

    fn hash_buf(fill: char) -> TernaryBuffer {
        TernaryBuffer::from_trytes_exact(&trytes(fill, 81), HASH_TRITS).unwrap()
    }

    /// The 16-field fixture with all four mask groups populated.
    fn full_transaction() -> Transaction {
        let mut txn = Transaction::new();
        txn.set_hash(hash_buf('H')).unwrap();
        txn.set_signature_and_message_fragment(
            TernaryBuffer::from_trytes_exact(&trytes('S', 2187), SIGNATURE_TRITS).unwrap(),
        )
        .unwrap();
        txn.set_address(hash_buf('A')).unwrap();
        txn.set_value(-42);
        txn.set_obsolete_tag(
            TernaryBuffer::from_trytes_exact(&trytes('O', 27), TAG_TRITS).unwrap(),
        )
        .unwrap();
        txn.set_timestamp(1565200000);
        txn.set_current_index(2);
        txn.set_last_index(5);
        txn.set_bundle_hash(hash_buf('B')).unwrap();
        txn.set_trunk(hash_buf('T')).unwrap();
        txn.set_branch(hash_buf('R')).unwrap();
        txn.set_tag(TernaryBuffer::from_trytes_exact(&trytes('G', 27), TAG_TRITS).unwrap())
            .unwrap();
        txn.set_attachment_timestamp(1565200001);
        txn.set_attachment_timestamp_lower(1565200002);
        txn.set_attachment_timestamp_upper(1565200003);
        txn.set_nonce(TernaryBuffer::from_trytes_exact(&trytes('N', 27), NONCE_TRITS).unwrap())
            .unwrap();
        txn
    }

    #[test]
    fn test_full_transaction_exact_wire_form() {
        let txn = full_transaction();
        assert_eq!(txn.mask(), FieldMask::ALL);

        let expected = format!(
            "{{\"hash\":\"{h}\",\"signature_and_message_fragment\":\"{s}\",\
\"address\":\"{a}\",\"value\":-42,\"obsolete_tag\":\"{o}\",\"timestamp\":1565200000,\
\"current_index\":2,\"last_index\":5,\"bundle_hash\":\"{b}\",\
\"trunk_transaction_hash\":\"{t}\",\"branch_transaction_hash\":\"{r}\",\"tag\":\"{g}\",\
\"attachment_timestamp\":1565200001,\"attachment_timestamp_lower_bound\":1565200002,\
\"attachment_timestamp_upper_bound\":1565200003,\"nonce\":\"{n}\"}}",
            h = trytes('H', 81),
            s = trytes('S', 2187),
            a = trytes('A', 81),
            o = trytes('O', 27),
            b = trytes('B', 81),
            t = trytes('T', 81),
            r = trytes('R', 81),
            g = trytes('G', 27),
            n = trytes('N', 27),
        );

        let json = serialize_transaction(&txn, FieldMask::ALL).unwrap();
        assert_eq!(json, expected);
    }

    #[test]
    fn test_masked_omission_essence_only() {
        let txn = full_transaction();
        let json = serialize_transaction(&txn, FieldMask::ESSENCE).unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        let mut expected = vec![
            "address",
            "value",
            "obsolete_tag",
            "timestamp",
            "current_index",
            "last_index",
            "bundle_hash",
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);

        // relative order is still the canonical one
        assert!(json.starts_with("{\"address\":"));
        assert!(json.contains("\"bundle_hash\":"));
        assert!(!json.contains("nonce"));
        assert!(!json.contains("hash\":\"HHH"));
    }

    #[test]
    fn test_empty_mask_serializes_empty_object() {
        let txn = full_transaction();
        let json = serialize_transaction(&txn, FieldMask::NONE).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_transaction_roundtrip() {
        let txn = full_transaction();
        let json = serialize_transaction(&txn, FieldMask::ALL).unwrap();
        let decoded = deserialize_transaction(&json).unwrap();
        assert_eq!(decoded, txn);
        assert_eq!(decoded.mask(), FieldMask::ALL);
    }

    #[test]
    fn test_deserialize_transaction_missing_key() {
        let txn = full_transaction();
        let json = serialize_transaction(&txn, FieldMask::ALL).unwrap();
        let without_nonce = json.replace(&format!(",\"nonce\":\"{}\"", trytes('N', 27)), "");
        let result = deserialize_transaction(&without_nonce);
        assert!(matches!(result, Err(Error::MissingField("nonce"))));
    }

    #[test]
    fn test_tips_serialize_lifo() {
        let mut res = GetTipsResponse::new();
        res.push(hash_buf('A')).unwrap();
        res.push(hash_buf('B')).unwrap();
        let json = serialize_get_tips(&res).unwrap();
        let expected = format!(
            "{{\"tips\":[\"{}\",\"{}\"]}}",
            trytes('B', 81),
            trytes('A', 81)
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_addresses_serialize_fifo() {
        let mut res = GenerateAddressResponse::new();
        res.push(hash_buf('A')).unwrap();
        res.push(hash_buf('B')).unwrap();
        let json = serialize_generate_address(&res).unwrap();
        let expected = format!(
            "{{\"address\":[\"{}\",\"{}\"]}}",
            trytes('A', 81),
            trytes('B', 81)
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_found_hashes_serialize_fifo() {
        let mut res = FindTransactionsResponse::new();
        res.push(hash_buf('X')).unwrap();
        res.push(hash_buf('Y')).unwrap();
        let json = serialize_find_transactions(&res).unwrap();
        let expected = format!(
            "{{\"hashes\":[\"{}\",\"{}\"]}}",
            trytes('X', 81),
            trytes('Y', 81)
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_deserialize_send_transfer_fixture() {
        let address = trytes('X', 81);
        let request = format!(
            "{{\"value\":100,\"message\":\"AMESSAGE9\",\"tag\":\"AMESSAGE9\",\"address\":\"{address}\"}}"
        );
        let req = deserialize_send_transfer(&request).unwrap();
        assert_eq!(req.value, 100);
        let m = TernaryBuffer::from_trytes("AMESSAGE9").unwrap();
        assert_eq!(req.message, m);
        assert_eq!(req.tag, m);
        assert_eq!(
            req.address,
            TernaryBuffer::from_trytes_exact(&address, HASH_TRITS).unwrap()
        );
    }

    #[test]
    fn test_deserialize_send_transfer_errors() {
        assert!(matches!(
            deserialize_send_transfer("{not json"),
            Err(Error::MalformedJson(_))
        ));

        let no_value = format!(
            "{{\"message\":\"M\",\"tag\":\"M\",\"address\":\"{}\"}}",
            trytes('X', 81)
        );
        assert!(matches!(
            deserialize_send_transfer(&no_value),
            Err(Error::MissingField("value"))
        ));

        let bad_tag = format!(
            "{{\"value\":1,\"message\":\"M\",\"tag\":\"m!\",\"address\":\"{}\"}}",
            trytes('X', 81)
        );
        assert!(matches!(
            deserialize_send_transfer(&bad_tag),
            Err(Error::InvalidEncoding(_))
        ));

        let short_address =
            "{\"value\":1,\"message\":\"M\",\"tag\":\"M\",\"address\":\"XYZ\"}";
        assert!(matches!(
            deserialize_send_transfer(short_address),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_serialize_send_transfer_response() {
        let res = SendTransferResponse::new(hash_buf('H')).unwrap();
        let json = serialize_send_transfer(&res).unwrap();
        assert_eq!(json, format!("{{\"hash\":\"{}\"}}", trytes('H', 81)));
    }

    #[test]
    fn test_deserialize_find_transaction_objects_order() {
        let text = format!(
            "{{\"hashes\":[\"{}\",\"{}\"]}}",
            trytes('A', 81),
            trytes('B', 81)
        );
        let req = deserialize_find_transaction_objects(&text).unwrap();
        let order: Vec<String> = req.iter().map(|h| h.to_trytes()).collect();
        assert_eq!(order, vec![trytes('A', 81), trytes('B', 81)]);

        assert!(matches!(
            deserialize_find_transaction_objects("{}"),
            Err(Error::MissingField("hashes"))
        ));
    }

    #[test]
    fn test_transaction_list_is_bare_array() {
        let mut res = FindTransactionObjectsResponse::new();
        res.push(full_transaction());
        res.push(full_transaction());
        let json = serialize_transaction_list(&res).unwrap();
        assert!(json.starts_with("[{\"hash\":"));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_fetch_txn_with_uuid_status_tokens() {
        let res = FetchTxnWithUuidResponse::new(RequestStatus::NotExist);
        assert_eq!(
            serialize_fetch_txn_with_uuid(&res).unwrap(),
            "{\"status\":\"NOT_EXIST\"}"
        );

        let res = FetchTxnWithUuidResponse::new(RequestStatus::Unsent);
        assert_eq!(
            serialize_fetch_txn_with_uuid(&res).unwrap(),
            "{\"status\":\"UNSENT\"}"
        );

        let mut res = FetchTxnWithUuidResponse::new(RequestStatus::Sent);
        res.push(full_transaction());
        let json = serialize_fetch_txn_with_uuid(&res).unwrap();
        assert!(json.starts_with("{\"status\":\"SENT\",\"bundle\":[{\"hash\":"));
    }
}
