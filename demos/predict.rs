use darklight::{classify, forward, Matrix, Params};

fn main() {
    let params = match Params::load_json("params.json") {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: params.json: {}", e);
            std::process::exit(1);
        }
    };
    println!("loaded {} transform layers from params.json", params.layer_count());

    let colors = [
        ("white", 255, 255, 255),
        ("black", 0, 0, 0),
        ("sky blue", 135, 206, 235),
        ("navy", 0, 0, 128),
        ("gold", 255, 215, 0),
        ("crimson", 220, 20, 60),
    ];

    for (name, r, g, b) in colors {
        let x = Matrix::column(vec![r as f64, g as f64, b as f64]);
        let (out, _) = forward(&x, &params).expect("shipped parameters validated at load");
        let activation = out.data[0][0];
        let text = if classify(activation) == 1 { "dark" } else { "light" };
        println!(
            "rgb({:>3},{:>3},{:>3}) {:<9} -> {:.4} -> {} text",
            r, g, b, name, activation, text
        );
    }
}
