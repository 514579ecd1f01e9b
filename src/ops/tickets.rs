//! Ticket operations.

use reqwest::Method;

use crate::error::LanternError;
use crate::instance::TdxInstance;
use crate::models::{StatusFeedEntry, Ticket, TicketSearch};
use crate::resolver::Category;

impl TdxInstance {
    /// Fetches a ticket by number, including custom attributes.
    pub async fn get_ticket(
        &self,
        ticket_id: &str,
        app_name: Option<&str>,
    ) -> Result<Ticket, LanternError> {
        let app = self.ticket_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;
        self.client()
            .get_json(&format!("{}/tickets/{}", app_id, ticket_id))
            .await
    }

    /// Searches a ticket application by requester, statuses, and title.
    ///
    /// Status names are resolved within the application's namespace, and
    /// the responsible group is resolved when given. The remote search has
    /// no title criterion, so titles are matched locally by exact
    /// comparison after the results come back; relative order is
    /// preserved.
    pub async fn search_tickets(
        &self,
        requester_uid: &str,
        status_names: &[&str],
        title: &str,
        responsible_group: Option<&str>,
        app_name: Option<&str>,
    ) -> Result<Vec<Ticket>, LanternError> {
        let app = self.ticket_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;

        let mut status_ids = Vec::with_capacity(status_names.len());
        for status_name in status_names {
            status_ids.push(
                self.resolver()
                    .resolve(Category::TicketStatuses, status_name, Some(app))
                    .await?,
            );
        }

        let responsibility_group_ids = match responsible_group {
            Some(group_name) => Some(vec![
                self.resolver()
                    .resolve(Category::GroupIds, group_name, None)
                    .await?,
            ]),
            None => None,
        };

        let body = TicketSearch {
            requestor_uids: vec![requester_uid.to_string()],
            status_ids,
            responsibility_group_ids,
        };
        let tickets: Vec<Ticket> = self
            .client()
            .post_json(&format!("{}/tickets/search", app_id), &body)
            .await?;

        Ok(tickets
            .into_iter()
            .filter(|ticket| ticket.title == title)
            .collect())
    }

    /// Moves a ticket to a new status via a private, plain-text feed
    /// entry.
    pub async fn update_ticket_status(
        &self,
        ticket_id: &str,
        status_name: &str,
        comments: &str,
        app_name: Option<&str>,
    ) -> Result<(), LanternError> {
        let app = self.ticket_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;
        let status_id = self
            .resolver()
            .resolve(Category::TicketStatuses, status_name, Some(app))
            .await?;

        let entry = StatusFeedEntry::private_comment(status_id, comments);
        let _: serde_json::Value = self
            .client()
            .post_json(&format!("{}/tickets/{}/feed", app_id, ticket_id), &entry)
            .await?;
        Ok(())
    }

    /// Attaches an asset to a ticket.
    ///
    /// # Errors
    ///
    /// A non-success response fails with `AttachFailed` carrying both
    /// identifiers. The remote does not say *why* - a ticket that already
    /// has the asset attached is the usual cause, but it is reported the
    /// same as any other rejection.
    pub async fn attach_asset_to_ticket(
        &self,
        ticket_id: &str,
        asset_id: &str,
        app_name: Option<&str>,
    ) -> Result<(), LanternError> {
        let app = self.ticket_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;

        let endpoint = format!("{}/tickets/{}/assets/{}", app_id, ticket_id, asset_id);
        let response = self
            .client()
            .dispatch(Method::POST, &endpoint, true, None)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                %status,
                body = %body,
                ticket_id,
                asset_id,
                "attach rejected by remote"
            );
            return Err(LanternError::AttachFailed {
                ticket_id: ticket_id.to_string(),
                asset_id: asset_id.to_string(),
            });
        }
        Ok(())
    }
}
