fn main() {
    repair_shop::server::run();
}
