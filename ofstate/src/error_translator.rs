//! C2: Error Translator (spec.md §4.2). Two entry points — a generic
//! send-error and a flow-mod-specific translator — both funneled through
//! the `Connection` collaborator. Neither ever propagates a failure up to
//! the caller: a failed send is logged and swallowed, per spec.md §4.2's
//! "the translator never throws."

use ofproto::{ErrorKind, ErrorType, Message, Version, Xid};

use crate::connection::{Connection, CxnId};

/// Generic send-error: type/code verbatim, optional offending message bytes.
pub fn send_error(
    connection: &mut impl Connection,
    cxn_id: CxnId,
    version: Version,
    xid: Xid,
    error_type: ErrorType,
    code: u16,
    data: Option<Vec<u8>>,
) {
    if let Err(err) = connection.send_error(cxn_id, version, xid, error_type, code, data) {
        tracing::error!(?err, ?error_type, code, xid, "failed to send error reply");
    }
}

/// Flow-mod-specific translator: maps an internal [`ErrorKind`] to a
/// version-specific (type, code) pair and sends it, echoing `offending` as
/// the error's data per spec.md §7 ("every failed flow-mod generates an
/// error message with the offending request echoed as data").
pub fn send_flow_mod_error(
    connection: &mut impl Connection,
    cxn_id: CxnId,
    version: Version,
    xid: Xid,
    kind: ErrorKind,
    offending: Option<Vec<u8>>,
) {
    let Some((error_type, code)) = ofproto::errors::flow_mod_error(kind, version) else {
        return;
    };
    send_error(connection, cxn_id, version, xid, error_type, code, offending);
}

/// Renders a failing request as the bytes echoed back in its error's `data`
/// field (spec.md §7). There's no wire encoder in this crate to produce the
/// original bytes (spec.md §6 leaves that to the codec below the state
/// manager), so the request's `Debug` form stands in for them.
pub fn echo(value: &impl std::fmt::Debug) -> Vec<u8> {
    format!("{value:?}").into_bytes()
}

/// Unhandled message kinds, per spec.md §4.6, get `BadRequest/BadType` with
/// the inbound xid preserved.
pub fn send_bad_type(connection: &mut impl Connection, cxn_id: CxnId, message: &Message) {
    use ofproto::BadRequestCode;
    send_error(
        connection,
        cxn_id,
        message.version(),
        message.xid(),
        ErrorType::BadRequest,
        BadRequestCode::BadType.wire_code(message.version()),
        None,
    );
}
