//! Example renders shipped with the CLI.
//!
//! The sync demo uses `/v1/renders-sync`; the others go through the job
//! workflow. Placeholder syntax belongs to the service; templates are sent as-is.

use std::path::{Path, PathBuf};

use latexlite_api_types::{RenderRequest, TemplateData, TemplateValue};
use tracing::info;

use crate::client::{ClientError, RenderClient};
use crate::latex;

pub const HELLO_TEMPLATE: &str =
    r"\documentclass{article}\begin{document}Hello, [[.Who]]!\end{document}";

pub const SIMPLE_TEMPLATE: &str = r"\documentclass{article}\begin{document}\title{ [[.Title]] }\author{ [[.Author]] }\maketitle

[[.Content]] \end{document}";

pub const INVOICE_TEMPLATE: &str = r"\documentclass{article}
\usepackage[margin=1in]{geometry}
\begin{document}
\begin{center}{\Large \textbf{INVOICE}}\end{center}
\vspace{1em}

\noindent\textbf{Invoice \#:} [[.InvoiceNumber]] \\
\textbf{Date:} [[.Date]]

\vspace{1em}
\noindent\textbf{Bill To:} \\
[[.CustomerName]] \\
[[.CustomerAddress]]

\vspace{2em}

% --- Table starts here ---
\vspace{1em}
\begin{tabular}{|p{8cm}|r|}
\hline
\textbf{Description} & \textbf{Amount} \\
\hline
[[range .Items]] [[.Description]] & \$[[.Amount]] \\
\hline
[[end]]
\textbf{Total:} & \textbf{\$[[.Total]]} \\
\hline
\end{tabular}
\vspace{2em}
% --- Table ends here ---

\vspace{2em}

\noindent Thank you for your business!

\end{document}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Sync,
    Simple,
    Invoice,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Sync, Demo::Simple, Demo::Invoice];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Sync => "sync",
            Demo::Simple => "simple",
            Demo::Invoice => "invoice",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Demo::Sync => "sync.pdf",
            Demo::Simple => "simple.pdf",
            Demo::Invoice => "invoice.pdf",
        }
    }

    pub fn request(self) -> RenderRequest {
        match self {
            Demo::Sync => RenderRequest::new(
                HELLO_TEMPLATE,
                TemplateData::new().with("Who", "sync world"),
            ),
            Demo::Simple => RenderRequest::new(
                SIMPLE_TEMPLATE,
                TemplateData::new()
                    .with("Title", "My First PDF")
                    .with("Author", "Rust Client")
                    .with("Content", "This PDF was generated using the LaTeX Lite API!"),
            ),
            Demo::Invoice => RenderRequest::new(INVOICE_TEMPLATE, invoice_data()),
        }
    }

    /// Render this demo into `output_dir`, returning the written path.
    pub async fn run(
        self,
        client: &RenderClient,
        output_dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        let destination = output_dir.join(self.file_name());
        let request = self.request();
        match self {
            Demo::Sync => {
                client.render_sync(&request, &destination).await?;
            }
            Demo::Simple | Demo::Invoice => {
                let job = client.create_and_wait(&request, &destination).await?;
                info!(demo = self.name(), job_id = %job.id, "demo job succeeded");
            }
        }
        Ok(destination)
    }
}

/// Invoice payload with one repeated row per line item. Descriptions are
/// free text, so they are LaTeX-escaped; the address already carries a
/// deliberate line break.
pub fn invoice_data() -> TemplateData {
    let items: Vec<TemplateValue> = [
        ("LaTeX API Integration", "1500.00"),
        ("Custom Templates", "800.00"),
        ("Support & Training", "700.00"),
    ]
    .into_iter()
    .map(|(description, amount)| {
        TemplateData::new()
            .with("Description", latex::escape(description))
            .with("Amount", amount)
            .into()
    })
    .collect();

    TemplateData::new()
        .with("InvoiceNumber", "INV-RS-001")
        .with("Date", "December 14, 2025")
        .with("CustomerName", "Tech Startup Inc")
        .with("CustomerAddress", r"456 Innovation Drive\\San Francisco, CA 94105")
        .with("Items", items)
        .with("Total", "3000.00")
}
