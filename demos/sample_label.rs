use temu_label::{FontDir, LabelData, LabelRenderer, OutputPolicy};

fn main() {
    let data = LabelData {
        service_type: "邮政特快专递".to_string(),
        phone_number: "13616578186xx".to_string(),
        item_number: "8559".to_string(),
        quantity: 8,
        total_items: 1,
        warehouse: "建闽店".to_string(),
        shipping_crate: "三水一产25号子仓".to_string(),
        current_time: String::new(),
    };

    let renderer = LabelRenderer::new(FontDir::new("fonts"), OutputPolicy::new("labels"));
    let label = renderer.render(data).expect("can render label");
    for warning in &label.warnings {
        eprintln!("warning: {warning}");
    }
    println!("{}", label.path.display());
}
