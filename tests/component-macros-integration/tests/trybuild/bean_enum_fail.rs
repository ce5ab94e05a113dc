use bean_macros::Bean;

#[derive(Bean)]
enum Protocol {
    Pop3,
    Smtp,
}

fn main() {}
