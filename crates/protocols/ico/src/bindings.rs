//! Contract interface bindings
//!
//! The consumed surface of the two deployed contracts. The NFT collection is
//! ERC721Enumerable-shaped; only the two functions the scan needs are bound.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IGateToken {
        function owner() external view returns (address);
        function withdraw() external;
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function claim() external;
        function mint(uint256 amount) external payable;
        function tokenIdsClaimed(uint256 tokenId) external view returns (bool);
    }

    #[sol(rpc)]
    interface INftCollection {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
    }
}
