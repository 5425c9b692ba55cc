fn main() {
    nucleon_sim::app::run();
}
