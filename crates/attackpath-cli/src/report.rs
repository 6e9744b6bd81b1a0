//! Terminal output for query results.

use attackpath_engine::{PathOutcome, RankedTarget};

pub fn print_assets(assets: &[String]) {
    println!("\n=== Assets ({} places) ===", assets.len());
    for (i, asset) in assets.iter().enumerate() {
        println!("{}. {}", i + 1, asset);
    }
}

pub fn print_path(start: &str, target: &str, outcome: &PathOutcome) {
    println!("\n=== Shortest Path Result (Dijkstra) ===");
    match outcome {
        PathOutcome::Unreachable => {
            println!("[-] No path: {} -> {}", start, target);
            println!("    Total cost: inf");
        }
        PathOutcome::Reachable { cost, edges } => {
            println!("[+] Path found: {} -> {}", start, target);
            println!("    Total cost: {:.2}", cost);
            println!("    Hops      : {}", edges.len());
            if !edges.is_empty() {
                println!("\nSteps:");
                for (i, e) in edges.iter().enumerate() {
                    println!(
                        "  {:02}. {} -> {} | {} | w={}",
                        i + 1,
                        e.src,
                        e.dst,
                        e.label,
                        e.weight
                    );
                }
            }
        }
    }
}

pub fn print_ranking(start: &str, ranked: &[RankedTarget]) {
    println!("\n=== Asset reach ranking from {} ===", start);
    for entry in ranked {
        if entry.is_reachable() {
            println!("  - {}: cost={:.2}", entry.node, entry.cost);
        } else {
            println!("  - {}: unreachable", entry.node);
        }
    }
}

pub fn print_unknown(role: &str, node: &str, mut available: Vec<String>) {
    available.sort();
    eprintln!("\n[!] {} node '{}' is not in the graph.", role, node);
    eprintln!("Available nodes: {}", available.join(", "));
}

pub fn to_json(
    start: &str,
    target: &str,
    outcome: &PathOutcome,
    ranked: &[RankedTarget],
) -> serde_json::Value {
    serde_json::json!({
        "start": start,
        "target": target,
        "path": outcome,
        "ranking": ranked,
    })
}
