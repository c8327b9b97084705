fn main() {
    vitrine::app::startup::startup();
}
