//! Leg collection tests against hand-written result pages.

use super::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 2, 27).unwrap()
}

fn code(s: &str) -> IataCode {
    IataCode::parse(s).unwrap()
}

fn priced(amount: &str) -> String {
    format!(r#"<label for="fare">PKR {amount} <input type="radio"></label>"#)
}

fn sold_out() -> String {
    "<label><span class=\"soldout\">Sold out</span></label>".to_string()
}

fn row(class: &str, dep: &str, arr: &str, fares: &[String]) -> String {
    let cells: String = fares
        .iter()
        .enumerate()
        .map(|(i, label)| format!(r#"<td class="family family-{i}">{label}</td>"#))
        .collect();
    format!(
        r#"<tr class="{class}">
             <td class="flight">PA-200</td>
             <td class="time leaving">{dep}</td>
             <td class="time landing">{arr}</td>
             {cells}
           </tr>"#
    )
}

fn on_time(dep: &str, arr: &str, fares: &[String]) -> String {
    row("flight-status-ontime", dep, arr, fares)
}

fn table(id: &str, labels: &[&str], rows: &[String]) -> String {
    let headers: String = labels
        .iter()
        .map(|label| format!(r#"<th class="family"><span>{label}</span></th>"#))
        .collect();
    format!(
        r#"<table id="{id}">
             <thead><tr><th>Flight</th><th>Depart</th><th>Arrive</th>{headers}</tr></thead>
             <tbody>{}</tbody>
           </table>"#,
        rows.concat()
    )
}

fn page(tables: &[String]) -> Html {
    Html::parse_document(&format!(
        "<html><head><title>Select Flights</title></head><body>{}</body></html>",
        tables.concat()
    ))
}

fn collect(document: &Html, group: FlightGroup) -> CollectedLegs {
    collect_legs(document, date(), code("KHI"), code("ISB"), group)
}

fn summary(legs: &[ItineraryLeg]) -> Vec<(String, String, f64)> {
    legs.iter()
        .map(|leg| {
            (
                leg.departure().format("%H:%M").to_string(),
                leg.fare_class().to_string(),
                leg.amount(),
            )
        })
        .collect()
}

#[test]
fn table_key_format() {
    assert_eq!(table_key(FlightGroup::OUTBOUND, date()), "trip_1_date_2020_02_27");
    assert_eq!(
        table_key(FlightGroup::new(3), NaiveDate::from_ymd_opt(2021, 11, 5).unwrap()),
        "trip_3_date_2021_11_05"
    );
}

#[test]
fn one_leg_per_priced_row_and_class() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value Fare", "Flexi Fare"],
        &[
            on_time("07:00 AM", "09:00 AM", &[priced("12,000"), priced("15,500")]),
            on_time("12:00 PM", "02:00 PM", &[sold_out(), priced("16,000")]),
            on_time("06:00 PM", "08:00 PM", &[priced("9,999.50"), sold_out()]),
        ],
    )]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);

    assert!(collected.malformed_rows.is_empty());
    assert_eq!(
        summary(&collected.legs),
        vec![
            ("07:00".into(), "Value".into(), 12000.0),
            ("07:00".into(), "Flexi".into(), 15500.0),
            ("12:00".into(), "Flexi".into(), 16000.0),
            ("18:00".into(), "Value".into(), 9999.5),
        ]
    );
}

#[test]
fn legs_carry_requested_route_and_times() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[on_time("08:15 AM", "10:05 AM", &[priced("5,000")])],
    )]);

    let legs = collect(&doc, FlightGroup::OUTBOUND).into_legs();

    assert_eq!(legs.len(), 1);
    let leg = &legs[0];
    assert_eq!(leg.origin(), code("KHI"));
    assert_eq!(leg.destination(), code("ISB"));
    assert_eq!(leg.departure().date(), date());
    assert_eq!(leg.duration().to_string(), "1 hour(s) 50 minute(s)");
    assert_eq!(leg.price().currency().as_str(), "PKR");
}

#[test]
fn overnight_row_lands_next_day() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[on_time("11:30 PM", "01:45 AM", &[priced("20,000")])],
    )]);

    let legs = collect(&doc, FlightGroup::OUTBOUND).into_legs();

    assert_eq!(legs[0].arrival().date(), date().succ_opt().unwrap());
    assert_eq!(legs[0].duration().to_string(), "2 hour(s) 15 minute(s)");
}

#[test]
fn missing_table_is_empty() {
    let doc = page(&[table(
        "trip_1_date_2020_02_28",
        &["Value"],
        &[on_time("08:00 AM", "10:00 AM", &[priced("5,000")])],
    )]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);
    assert!(collected.is_empty());
    assert!(collected.malformed_rows.is_empty());
}

#[test]
fn only_on_time_rows_are_read() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[
            row("flight-status-cancelled", "08:00 AM", "10:00 AM", &[priced("5,000")]),
            row("flight-status-delayed", "09:00 AM", "11:00 AM", &[priced("5,500")]),
        ],
    )]);

    assert!(collect(&doc, FlightGroup::OUTBOUND).is_empty());
}

#[test]
fn group_index_selects_table() {
    let doc = page(&[
        table(
            "trip_1_date_2020_02_27",
            &["Value"],
            &[on_time("08:00 AM", "10:00 AM", &[priced("5,000")])],
        ),
        table(
            "trip_2_date_2020_02_27",
            &["Value"],
            &[on_time("06:00 PM", "08:00 PM", &[priced("7,000")])],
        ),
    ]);

    let outbound = collect(&doc, FlightGroup::OUTBOUND).into_legs();
    let inbound = collect_legs(&doc, date(), code("ISB"), code("KHI"), FlightGroup::INBOUND)
        .into_legs();

    assert_eq!(summary(&outbound), vec![("08:00".into(), "Value".into(), 5000.0)]);
    assert_eq!(summary(&inbound), vec![("18:00".into(), "Value".into(), 7000.0)]);
    assert_eq!(inbound[0].origin(), code("ISB"));
}

#[test]
fn malformed_row_is_skipped_and_reported() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[
            on_time("08:00 AM", "10:00 AM", &[priced("5,000")]),
            on_time("TBA", "10:00 AM", &[priced("6,000")]),
            on_time("04:00 PM", "06:00 PM", &[priced("7,000")]),
        ],
    )]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);

    assert_eq!(collected.legs.len(), 2);
    assert_eq!(collected.malformed_rows.len(), 1);
    assert_eq!(collected.malformed_rows[0].row, 1);
    assert!(matches!(
        collected.malformed_rows[0].error,
        RowError::MalformedTime(_)
    ));
}

#[test]
fn row_without_time_cell_is_reported() {
    let broken = r#"<tr class="flight-status-ontime">
                      <td class="time leaving">08:00 AM</td>
                      <td class="family family-0"><label>PKR 5,000 </label></td>
                    </tr>"#
        .to_string();
    let doc = page(&[table("trip_1_date_2020_02_27", &["Value"], &[broken])]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);

    assert!(collected.is_empty());
    assert_eq!(
        collected.malformed_rows[0].error,
        RowError::MissingTimeCell("arrival")
    );
}

#[test]
fn more_labels_than_cells_pairs_shorter() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value", "Flexi", "Extra"],
        &[on_time("08:00 AM", "10:00 AM", &[priced("5,000"), priced("6,000")])],
    )]);

    let legs = collect(&doc, FlightGroup::OUTBOUND).into_legs();
    assert_eq!(
        summary(&legs),
        vec![
            ("08:00".into(), "Value".into(), 5000.0),
            ("08:00".into(), "Flexi".into(), 6000.0),
        ]
    );
}

#[test]
fn more_cells_than_labels_pairs_shorter() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[on_time("08:00 AM", "10:00 AM", &[priced("5,000"), priced("6,000")])],
    )]);

    let legs = collect(&doc, FlightGroup::OUTBOUND).into_legs();
    assert_eq!(summary(&legs), vec![("08:00".into(), "Value".into(), 5000.0)]);
}

#[test]
fn blank_label_keeps_column_alignment() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["  ", "Flexi"],
        &[on_time("08:00 AM", "10:00 AM", &[priced("5,000"), priced("6,000")])],
    )]);

    let legs = collect(&doc, FlightGroup::OUTBOUND).into_legs();
    assert_eq!(summary(&legs), vec![("08:00".into(), "Flexi".into(), 6000.0)]);
}

#[test]
fn non_fare_cells_are_ignored() {
    // The flight-number cell mentions a code-like token but is not a fare cell
    let row = r#"<tr class="flight-status-ontime">
                   <td class="flight">USD 1 </td>
                   <td class="time leaving">08:00 AM</td>
                   <td class="time landing">10:00 AM</td>
                   <td class="family family-ev"><label>PKR 5,000 </label></td>
                 </tr>"#
        .to_string();
    let doc = page(&[table("trip_1_date_2020_02_27", &["Value"], &[row])]);

    let legs = collect(&doc, FlightGroup::OUTBOUND).into_legs();
    assert_eq!(summary(&legs), vec![("08:00".into(), "Value".into(), 5000.0)]);
}

#[test]
fn unlabelled_fare_cell_keeps_its_column() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value", "Flexi", "Xtra"],
        &[on_time(
            "08:00 AM",
            "10:00 AM",
            &[priced("5,000"), "Sold out".to_string(), priced("9,000")],
        )],
    )]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);

    assert!(collected.malformed_rows.is_empty());
    assert_eq!(
        summary(&collected.legs),
        vec![
            ("08:00".into(), "Value".into(), 5000.0),
            ("08:00".into(), "Xtra".into(), 9000.0),
        ]
    );
}

#[test]
fn time_cell_reads_own_text_only() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[on_time(
            "11:30 PM",
            "01:45 AM<sup>+1</sup>",
            &[priced("20,000")],
        )],
    )]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);

    assert!(collected.malformed_rows.is_empty());
    assert_eq!(collected.legs.len(), 1);
    assert_eq!(collected.legs[0].arrival().date(), date().succ_opt().unwrap());
}

#[test]
fn time_nested_in_child_element_is_malformed() {
    let doc = page(&[table(
        "trip_1_date_2020_02_27",
        &["Value"],
        &[on_time("<b>08:00 AM</b>", "10:00 AM", &[priced("5,000")])],
    )]);

    let collected = collect(&doc, FlightGroup::OUTBOUND);

    assert!(collected.is_empty());
    assert!(matches!(
        collected.malformed_rows[0].error,
        RowError::MalformedTime(_)
    ));
}
