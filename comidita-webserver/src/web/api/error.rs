use super::json_error_response;
use anyhow::anyhow;
use comidita_application::error::{AppError, BError};
pub use comidita_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::BadRequest),
            JsonError::Parse(_str, err) => Self::OtherWithStatus(anyhow!(err), Status::BadRequest),
        }
    }
}

fn parameter_status(err: &ParameterError) -> Status {
    match err {
        ParameterError::Unauthenticated => Status::Unauthorized,
        ParameterError::DuplicateReview => Status::Conflict,
        ParameterError::Upstream(_) => Status::InternalServerError,
        ParameterError::Repo(RepoError::NotFound) => Status::NotFound,
        ParameterError::Repo(_) => Status::InternalServerError,
        _ => Status::BadRequest,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let AppError::Business(err) = &err {
                    match err {
                        BError::Parameter(err) => {
                            let status = parameter_status(err);
                            if status != Status::InternalServerError {
                                return json_error_response(req, err, status);
                            }
                        }
                        BError::Repo(RepoError::NotFound) => {
                            return json_error_response(req, err, Status::NotFound);
                        }
                        BError::Repo(RepoError::AlreadyExists) => {
                            return json_error_response(req, err, Status::Conflict);
                        }
                        BError::Repo(RepoError::Other(_)) => {}
                    }
                }
                error!("Error: {err:#}");
                json_error_response(req, &INTERNAL_ERROR_MESSAGE, Status::InternalServerError)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err:#}");
                json_error_response(req, &INTERNAL_ERROR_MESSAGE, Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
