//! Gateway actor - runs backend HTTP calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::gateway::client;
use crate::messages::{GatewayCommand, GatewayResponse};

/// Gateway actor that processes fetch commands
pub struct GatewayActor {
    client: reqwest::Client,
    base_url: String,
    response_tx: mpsc::UnboundedSender<GatewayResponse>,
    in_flight: JoinSet<()>,
}

impl GatewayActor {
    pub fn new(base_url: String, response_tx: mpsc::UnboundedSender<GatewayResponse>) -> Self {
        GatewayActor {
            client: client::create_client(),
            base_url,
            response_tx,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the gateway actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<GatewayCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(GatewayCommand::FetchProjects { folder_path }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(folder = %folder_path, "listing project files");
                                let result = client::list_files_with_retry(
                                    &client, &base_url, &folder_path,
                                ).await;
                                let response = match result {
                                    Ok(entries) => {
                                        tracing::info!(entries = entries.len(), "project listing complete");
                                        GatewayResponse::Projects { entries }
                                    }
                                    Err(e) => GatewayResponse::ProjectsFailed {
                                        message: format!(
                                            "Max retries reached. Failed to fetch databases: {}",
                                            e
                                        ),
                                    },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(GatewayCommand::FetchTables { db }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(db = %db, "fetching tables");
                                let response = match client::get_tables(&client, &base_url, &db).await {
                                    Ok(tables) => GatewayResponse::Tables { db, tables },
                                    Err(e) => GatewayResponse::TablesFailed {
                                        db,
                                        message: format!("Error fetching tables: {}", e),
                                    },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(GatewayCommand::FetchTableDetails { selection }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(tables = selection.len(), "fetching table details");
                                let result = client::get_table_details(
                                    &client, &base_url, &selection,
                                ).await;
                                let response = match result {
                                    Ok(details) => GatewayResponse::TableDetails { selection, details },
                                    Err(e) => GatewayResponse::TableDetailsFailed {
                                        message: format!("Error fetching table details: {}", e),
                                    },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(GatewayCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.in_flight.join_next() => {}
            }
        }
    }
}
