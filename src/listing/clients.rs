use super::Query;
use crate::models::Client;

/// Clients whose name, contact or email contains `query`
pub fn filter(clients: &[Client], query: &str) -> Vec<Client> {
    let query = Query::new(query);
    clients
        .iter()
        .filter(|client| {
            query.matches_any(&[
                client.name.as_str(),
                client.contact_name.as_str(),
                client.email.as_str(),
            ])
        })
        .cloned()
        .collect()
}
