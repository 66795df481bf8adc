fn main() {
    mindnav::run();
}
