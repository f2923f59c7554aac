use crate::store::{RecordStore, StoreError};
use crate::utils::flash::{self, FlashMessage};
use crate::utils::html;
use actix_web::{HttpRequest, HttpResponse, http::header::ContentType, web};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
}

fn render(consumed_flash: bool, page: String) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if consumed_flash {
        flash::clear(&mut builder);
    }
    builder.content_type(ContentType::html()).body(page)
}

/// Attendance form
pub async fn index(req: HttpRequest) -> HttpResponse {
    let notices: Vec<FlashMessage> = flash::take(&req).into_iter().collect();
    render(flash::is_pending(&req), html::index_page(&notices))
}

/// Form submission: append and redirect
pub async fn submit(store: web::Data<RecordStore>, form: web::Form<SubmitForm>) -> HttpResponse {
    let name = form.into_inner().name;

    match web::block(move || store.append(&name)).await {
        Ok(Ok(record)) => {
            info!(name = %record.name, "Attendance marked");
            flash::redirect(
                "/dashboard",
                FlashMessage::success(format!(
                    "Attendance marked for {}!",
                    flash::quote(&record.name)
                )),
            )
        }
        Ok(Err(StoreError::EmptyName)) => {
            flash::redirect("/", FlashMessage::error(StoreError::EmptyName.to_string()))
        }
        Ok(Err(e)) => {
            error!(error = %e, "Error writing attendance");
            flash::redirect(
                "/dashboard",
                FlashMessage::error(format!("Error marking attendance: {e}")),
            )
        }
        Err(e) => {
            error!(error = %e, "Attendance write task failed");
            flash::redirect(
                "/dashboard",
                FlashMessage::error(format!("Error marking attendance: {e}")),
            )
        }
    }
}

/// Listing of every record, oldest first
pub async fn dashboard(req: HttpRequest, store: web::Data<RecordStore>) -> HttpResponse {
    let mut notices: Vec<FlashMessage> = flash::take(&req).into_iter().collect();
    let consumed_flash = flash::is_pending(&req);

    let records = match web::block(move || store.read_all()).await {
        Ok(Ok(records)) => records,
        Ok(Err(StoreError::Absent { path })) => {
            warn!(path = %path.display(), "Attendance file not found when trying to read");
            notices.push(FlashMessage::warning(
                "Attendance file not found. Please mark some attendance!",
            ));
            Vec::new()
        }
        Ok(Err(e)) => {
            error!(error = %e, "Error reading attendance file");
            notices.push(FlashMessage::error(format!("Error loading dashboard: {e}")));
            Vec::new()
        }
        Err(e) => {
            error!(error = %e, "Attendance read task failed");
            notices.push(FlashMessage::error(format!("Error loading dashboard: {e}")));
            Vec::new()
        }
    };

    render(consumed_flash, html::dashboard_page(&notices, &records))
}
