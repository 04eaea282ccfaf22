//! The sample private-equity deal memorandum.

use crate::block::{Block, Document};

const SECTION_GAP: f32 = 0.2;
const ITEM_GAP: f32 = 0.1;

/// Builds the fixed sample deal memorandum.
///
/// Seven sections precede an explicit page break; the management team and
/// due diligence sections follow it.
#[must_use]
pub fn deal_memo() -> Document {
    let mut doc = Document::new("CONFIDENTIAL - DEAL MEMORANDUM");
    doc.push(Block::title("CONFIDENTIAL - DEAL MEMORANDUM"));
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("EXECUTIVE SUMMARY"));
    doc.push(Block::body(
        "Titan Capital Partners proposes to acquire 100% of ACME Manufacturing Corp for an \
         enterprise value of $450 million. ACME is a leading manufacturer of industrial \
         components with strong market position and consistent cash flows.",
    ));
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("KEY METRICS"));
    for metric in [
        "Enterprise Value: $450M",
        "Equity Investment: $180M (40%)",
        "Debt Financing: $270M (60%)",
        "Entry Multiple: 8.5x LTM EBITDA",
        "Current EBITDA: $53M",
    ] {
        doc.push(Block::bullet(metric));
    }
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("FINANCIAL PROJECTIONS"));
    for projection in [
        "Year 1: Revenue $340M, EBITDA $72M (22.4% margin)",
        "Year 2: Revenue $385M, EBITDA $85M (22.1% margin)",
        "Year 3: Revenue $440M, EBITDA $101M (23.0% margin)",
        "Year 4: Revenue $510M, EBITDA $122M (23.9% margin)",
        "Year 5: Revenue $595M, EBITDA $149M (25.0% margin)",
    ] {
        doc.push(Block::body(projection));
    }
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("EXIT STRATEGY"));
    doc.push(Block::body("Target exit multiple: 8.5x EBITDA"));
    doc.push(Block::body("Projected exit value: $1,267M (at Year 5 EBITDA)"));
    doc.push(Block::body("Expected return: 3.5x MOIC, 28% IRR"));
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("RISK FACTORS"));
    doc.push(Block::lines([
        "\u{2022} Customer concentration (top 3 customers = 45% revenue)",
        "\u{2022} Competitive pressure from low-cost overseas manufacturers",
        "\u{2022} Raw material price volatility (steel, aluminum)",
        "\u{2022} Dependency on automotive sector (35% of revenue)",
        "\u{2022} Key personnel retention post-acquisition",
    ]));
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("VALUE CREATION PLAN"));
    let plan: [(&str, &[&str]); 3] = [
        (
            "1. Operational Excellence",
            &[
                "Implement lean manufacturing (target: 15% OPEX reduction)",
                "Upgrade ERP system for better inventory management",
                "Consolidate 3 facilities into 2 modern plants",
            ],
        ),
        (
            "2. Revenue Growth",
            &[
                "Expand into aerospace sector (high-margin, stable)",
                "Launch e-commerce channel for smaller customers",
                "Geographic expansion: Southeast US and Mexico",
            ],
        ),
        (
            "3. M&A Strategy",
            &[
                "Acquire 2-3 complementary manufacturers",
                "Budget: $50-75M for bolt-on acquisitions",
            ],
        ),
    ];
    for (index, (pillar, actions)) in plan.iter().enumerate() {
        if index > 0 {
            doc.push(Block::spacer_inches(ITEM_GAP));
        }
        doc.push(Block::body(*pillar));
        for action in *actions {
            doc.push(Block::body(format!("   - {action}")));
        }
    }

    doc.push(Block::PageBreak);

    doc.push(Block::heading("MANAGEMENT TEAM"));
    doc.push(Block::lines([
        "CEO: John Smith (retained, 15 years experience)",
        "CFO: Sarah Johnson (new hire, ex-Big 4)",
        "COO: Mike Williams (promoted internally)",
        "VP Sales: Lisa Brown (retained, 20 years)",
        "VP Operations: David Lee (new hire, lean manufacturing expert)",
    ]));
    doc.push(Block::spacer_inches(SECTION_GAP));

    doc.push(Block::heading("DUE DILIGENCE SUMMARY"));
    for finding in [
        "Financial: Clean audit, no material issues",
        "Legal: One minor ongoing lawsuit, well-reserved",
        "Environmental: All facilities compliant, no contamination",
        "Commercial: Strong customer relationships, no major churn risk",
        "IT: Legacy systems, modernization needed (budgeted)",
    ] {
        doc.push(Block::body(finding));
    }

    doc
}
