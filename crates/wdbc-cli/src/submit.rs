use tracing::debug;
use wdbc_client::{PredictClient, resolve_endpoint};
use wdbc_core::{Session, SessionError};

/// Run one prediction round trip for the session.
///
/// Only a session that cannot submit (vector incomplete, request already in
/// flight) is an error here. Endpoint, transport and backend failures are
/// recorded on the session as its current error.
pub async fn submit(session: &mut Session, base_url: &str) -> Result<(), SessionError> {
    let request = session.begin_submit()?;

    let outcome = match resolve_endpoint(base_url, session.endpoint()) {
        Ok(url) => {
            debug!(url = %url, "resolved endpoint");
            PredictClient::with_url(url).predict(&request).await
        }
        Err(e) => Err(e),
    };
    session.finish_submit(outcome.map_err(|e| e.to_string()));
    Ok(())
}
