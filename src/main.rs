fn main() {
    if let Err(err) = radar_chart_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
