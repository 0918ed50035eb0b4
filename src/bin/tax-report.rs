fn main() {
    if let Err(err) = ny_tax_stats::run_report() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
