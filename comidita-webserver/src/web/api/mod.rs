use std::{fmt::Display, result, sync::Arc};

use comidita_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, get,
    http::Status,
    post,
    response::{self, Responder},
    routes, Route, State,
};

use super::guards::*;
use crate::{
    adapters::json::{self, from_json, to_json},
    core::{prelude::*, usecases},
    web::{Cfg, ProxyCache},
};
use comidita_application::{error::AppError, prelude as flows};
use comidita_core::usecases::Error as ParameterError;

mod error;
mod places;
mod proxy;
mod reviews;
mod users;
mod util;

pub use self::error::Error as ApiError;


type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   places provider   --- //
        proxy::get_places_search,
        proxy::get_places_details,
        // ---   places   --- //
        places::get_places,
        places::get_place,
        places::get_place_reviews,
        places::get_categories,
        places::get_category_places,
        // ---   reviews   --- //
        reviews::post_review,
        reviews::get_review,
        reviews::get_recommendations,
        // ---   users   --- //
        users::get_current_user,
        util::get_version,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}
