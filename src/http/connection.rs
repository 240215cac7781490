use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::parser::parse_http_request;
use crate::http::response::{Response, StatusCode};
use crate::http::validate::{ResourceDescriptor, ValidationOutcome, Validator};
use crate::http::writer::ResponseWriter;
use crate::log::{Event, EventLog};

/// One accepted connection: a single request, a single response.
///
/// The request is taken from exactly one bounded read. A request larger
/// than the buffer is truncated and parsed as whatever arrived; a client
/// that never sends blocks the connection indefinitely.
pub struct Connection<'a, S> {
    stream: S,
    buffer: Vec<u8>,
    state: ConnectionState,
    validator: &'a Validator,
    log: &'a dyn EventLog,
}

pub enum ConnectionState {
    Reading,
    Processing(ValidationOutcome),
    Writing(ResponseWriter, Event),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        stream: S,
        read_buffer_size: usize,
        validator: &'a Validator,
        log: &'a dyn EventLog,
    ) -> Self {
        Self {
            stream,
            buffer: vec![0; read_buffer_size],
            state: ConnectionState::Reading,
            validator,
            log,
        }
    }

    /// Drives the connection to completion. Errors are transport failures;
    /// protocol failures are answered with an error response instead.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let outcome = self.read_request().await?;
                    self.state = ConnectionState::Processing(outcome);
                }

                ConnectionState::Processing(outcome) => {
                    let (response, event) = build_response(self.validator, outcome).await;

                    tracing::debug!(status = %response.status, "Responding");
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, event);
                }

                ConnectionState::Writing(writer, event) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await?;
                    self.log.record(event);
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ValidationOutcome> {
        let n = self.stream.read(&mut self.buffer).await?;

        let outcome = match parse_http_request(&self.buffer[..n]) {
            Ok(request) => {
                self.log.record(&Event::Request {
                    verb: request.method().to_string(),
                    resource: request.target().to_string(),
                });
                self.validator.validate(&request).await
            }
            Err(e) => {
                tracing::debug!(error = ?e, bytes = n, "Unparseable request");
                self.log.record(&Event::unparsed_request());
                ValidationOutcome::Failed(StatusCode::BadRequest)
            }
        };

        Ok(outcome)
    }
}

/// Picks the single response for an outcome. A resource that vanished
/// or became unreadable after validation is answered as Not Found.
pub async fn build_response(
    validator: &Validator,
    outcome: &ValidationOutcome,
) -> (Response, Event) {
    match outcome {
        ValidationOutcome::Ok(resource) => match read_resource(validator, resource).await {
            Ok(body) => {
                let event = Event::ResponseOk {
                    content_type: resource.content_type,
                    content_length: body.len() as u64,
                };
                (Response::resource(resource.content_type, body), event)
            }
            Err(e) => {
                tracing::warn!(
                    resource = %resource.relative_path,
                    error = %e,
                    "Validated resource could not be read"
                );
                error_response(StatusCode::NotFound)
            }
        },
        ValidationOutcome::Failed(status) => error_response(*status),
    }
}

fn error_response(status: StatusCode) -> (Response, Event) {
    (Response::error(status), Event::ResponseError { status })
}

async fn read_resource(
    validator: &Validator,
    resource: &ResourceDescriptor,
) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(validator.resolve(&resource.relative_path)).await
}
