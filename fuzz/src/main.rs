use jflow::{CollectingSink, JsonParser};

#[macro_use]
extern crate afl;

fn parse(data: &[u8]) -> Result<Vec<jflow::OwnedEvent>, jflow::ParserError> {
    let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
    parser.push(data)?;
    parser.finalise()?;
    Ok(parser.into_sink().events)
}

fn main() {
    fuzz!(|data: &[u8]| {
        let whole = parse(data);

        // Whatever the split point, feeding the same bytes in two pushes
        // must agree with feeding them in one.
        let mid = data.len() / 2;
        let mut parser: JsonParser<CollectingSink> = JsonParser::new(CollectingSink::new());
        let split_result = parser
            .push(&data[..mid])
            .and_then(|_| parser.push(&data[mid..]))
            .and_then(|_| parser.finalise());
        let split = split_result.map(|_| parser.into_sink().events);

        assert_eq!(whole.is_ok(), split.is_ok());
        if let (Ok(a), Ok(b)) = (&whole, &split) {
            assert_eq!(a, b);
        }
    });
}
