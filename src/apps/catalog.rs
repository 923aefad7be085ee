//! Canned content for the tabbed panels.

use indoc::{formatdoc, indoc};

use super::feed::{DelayedFeed, FeedSource};
use super::tabbed::{Tab, TabbedPanel};
use super::{AppKind, PanelDeps};

const LOG_TAIL_LINES: usize = 200;

fn canned(title: &str, body: &str, deps: &PanelDeps) -> Tab {
    Tab::new(
        title,
        DelayedFeed::new(FeedSource::from_text(body), deps.feed_delay),
    )
}

fn rag_console(deps: &PanelDeps) -> Vec<Tab> {
    vec![
        canned(
            "Query",
            indoc! {"
                > how do I rotate the ingest credentials?
                  top-3 chunks (cosine):
                  0.91  runbooks/ingest.md#rotation
                  0.87  security/secrets.md#service-accounts
                  0.74  faq/ingest.md
            "},
            deps,
        ),
        canned(
            "Indexes",
            indoc! {"
                NAME              DOCS     CHUNKS    EMBEDDER
                runbooks          1,204    18,930    text-embed-small
                product-docs      6,882    91,412    text-embed-small
                support-tickets   40,117   212,008   text-embed-large
            "},
            deps,
        ),
        canned(
            "Sources",
            indoc! {"
                s3://corp-docs/runbooks        synced 4m ago
                confluence:/ENG                synced 1h ago
                zendesk:/tickets               syncing  63%
            "},
            deps,
        ),
    ]
}

fn etl_studio(deps: &PanelDeps) -> Vec<Tab> {
    vec![
        canned(
            "Pipelines",
            indoc! {"
                PIPELINE           SCHEDULE     LAST RUN   STATUS
                orders_daily       0 2 * * *    02:00      ok
                clickstream_hourly 0 * * * *    14:00      ok
                crm_sync           */15 * * * * 14:15      retrying
            "},
            deps,
        ),
        canned(
            "Graph",
            indoc! {"
                [extract: postgres.orders] -> [clean] -> [dedupe]
                                                  \\-> [enrich: geo] -> [load: warehouse]
            "},
            deps,
        ),
        canned(
            "Runs",
            indoc! {"
                #4412 orders_daily        1,204,551 rows   3m12s   ok
                #4411 clickstream_hourly    88,090 rows      41s   ok
                #4410 crm_sync                   0 rows      9s   timeout
            "},
            deps,
        ),
    ]
}

fn mcp_dashboard(deps: &PanelDeps) -> Vec<Tab> {
    vec![
        canned(
            "Servers",
            indoc! {"
                SERVER          TRANSPORT   TOOLS   STATE
                filesystem      stdio       6       running
                github          http        14      running
                postgres-ro     stdio       3       stopped
            "},
            deps,
        ),
        canned(
            "Tools",
            indoc! {"
                github.create_issue      calls 1,204   p95 310ms
                filesystem.read_file     calls 9,882   p95  12ms
                postgres-ro.query        calls   118   p95 840ms
            "},
            deps,
        ),
        canned(
            "Sessions",
            indoc! {"
                sess-8f2a  agent: support-bot   tools: 3   idle 12s
                sess-1c07  agent: release-bot   tools: 5   active
            "},
            deps,
        ),
    ]
}

fn virtual_campus(deps: &PanelDeps) -> Vec<Tab> {
    vec![
        canned(
            "Map",
            indoc! {"
                +-----------+     +-----------+
                |  Library  |-----|  Commons  |
                +-----------+     +-----+-----+
                                        |
                +-----------+     +-----+-----+
                |   Lab 2   |-----|  Atrium   |
                +-----------+     +-----------+
            "},
            deps,
        ),
        canned(
            "Rooms",
            indoc! {"
                Commons     18 online   open
                Lab 2        4 online   session: intro to vectors
                Library      7 online   quiet hours
            "},
            deps,
        ),
        canned(
            "Schedule",
            indoc! {"
                09:00  Orientation            Atrium
                11:00  Prompting workshop     Lab 2
                15:00  Office hours           Commons
            "},
            deps,
        ),
    ]
}

fn server_admin(deps: &PanelDeps) -> Vec<Tab> {
    let overview = formatdoc! {"
        host      {host}
        role      desktop gateway
        os        {os} / {arch}
        services  4 running, 0 degraded
        ",
        host = deps.hostname,
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
    };
    vec![
        canned("Overview", &overview, deps),
        canned(
            "Services",
            indoc! {"
                UNIT              STATE     MEM
                api-gateway       running   212M
                vector-store      running   1.4G
                scheduler         running   96M
                object-cache      running   640M
            "},
            deps,
        ),
        Tab::new(
            "Logs",
            DelayedFeed::new(
                FeedSource::LogTail {
                    header: vec![format!("-- tail of {} desktop log --", deps.hostname)],
                    logs: deps.logs.clone(),
                    lines: LOG_TAIL_LINES,
                },
                deps.feed_delay,
            ),
        ),
    ]
}

pub(super) fn tabbed_panel(kind: AppKind, deps: &PanelDeps) -> TabbedPanel {
    let tabs = match kind {
        AppKind::RagConsole => rag_console(deps),
        AppKind::EtlStudio => etl_studio(deps),
        AppKind::McpDashboard => mcp_dashboard(deps),
        AppKind::VirtualCampus => virtual_campus(deps),
        AppKind::ServerAdmin => server_admin(deps),
        AppKind::AiStudio | AppKind::Terminal => Vec::new(),
    };
    TabbedPanel::new(tabs)
}
